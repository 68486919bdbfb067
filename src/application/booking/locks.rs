//! Per-location booking locks
//!
//! Booking creation reads availability and then writes; the location lock
//! makes that sequence exclusive per location within this process.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct LocationLocks {
    locks: DashMap<i32, Arc<Mutex<()>>>,
}

impl LocationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `location_id`; released when the guard drops.
    pub async fn acquire(&self, location_id: i32) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(location_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
