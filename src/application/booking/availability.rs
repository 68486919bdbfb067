//! Availability resolution
//!
//! A spot is free for `[start, end]` when no active booking on it conflicts
//! with the interval. The spot's cached `is_available` flag is not consulted:
//! it can lag behind bookings whose intervals lie elsewhere in time.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Booking, DomainError, DomainResult, RepositoryProvider, Spot, SpotFilter};

/// Reject empty or inverted intervals
pub fn validate_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<()> {
    if end <= start {
        return Err(DomainError::InvalidInterval(format!(
            "end_time {} must be after start_time {}",
            end.to_rfc3339(),
            start.to_rfc3339()
        )));
    }
    Ok(())
}

/// Filter `spots` down to those no booking in `bookings` blocks for the interval.
///
/// Keeps the input order.
pub fn free_spots(
    spots: Vec<Spot>,
    bookings: &[Booking],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Spot> {
    let blocked: HashSet<i32> = bookings
        .iter()
        .filter(|b| b.blocks(start, end))
        .map(|b| b.spot_id)
        .collect();

    spots
        .into_iter()
        .filter(|s| !blocked.contains(&s.id))
        .collect()
}

/// Computes free spots from the store
#[derive(Clone)]
pub struct AvailabilityResolver {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityResolver {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Spots at `location_id` free for the whole interval, in creation order.
    ///
    /// Callers validate the interval first.
    pub async fn available_spots(
        &self,
        location_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Spot>> {
        let spots = self
            .repos
            .spots()
            .find_where(SpotFilter::at_location(location_id))
            .await?;
        if spots.is_empty() {
            return Ok(spots);
        }

        let active = self
            .repos
            .bookings()
            .find_active_for_location(location_id)
            .await?;

        let total = spots.len();
        let free = free_spots(spots, &active, start, end);
        debug!(
            location_id,
            total,
            free = free.len(),
            active_bookings = active.len(),
            "Resolved availability"
        );
        Ok(free)
    }
}
