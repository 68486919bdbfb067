//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingFilter, BookingPatch, BookingStatus, NewBooking};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a booking without touching its spot
    async fn create(&self, booking: NewBooking) -> DomainResult<Booking>;

    /// Find booking by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// Bookings matching the filter, ordered by ID
    async fn find_where(&self, filter: BookingFilter) -> DomainResult<Vec<Booking>>;

    /// Pending and confirmed bookings at a location
    async fn find_active_for_location(&self, location_id: i32) -> DomainResult<Vec<Booking>>;

    /// Merge the patch into an existing booking
    async fn update(&self, id: i32, patch: BookingPatch) -> DomainResult<Booking>;

    /// Store the booking and mark its spot unavailable as one atomic step.
    ///
    /// Fails without side effects when the spot does not exist.
    async fn commit(&self, booking: NewBooking) -> DomainResult<Booking>;

    /// Move a booking to `status` and recompute its spot's availability flag
    /// (available unless another active booking remains on the spot), atomically.
    async fn release(&self, id: i32, status: BookingStatus) -> DomainResult<Booking>;
}
