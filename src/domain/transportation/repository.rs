//! Transportation repository interface

use async_trait::async_trait;

use super::model::{
    NewTransportationBooking, NewTransportationType, TransportationBooking, TransportationType,
};
use crate::domain::booking::BookingStatus;
use crate::domain::DomainResult;

#[async_trait]
pub trait TransportationRepository: Send + Sync {
    async fn create_type(&self, t: NewTransportationType) -> DomainResult<TransportationType>;

    async fn find_type(&self, id: i32) -> DomainResult<Option<TransportationType>>;

    /// All types ordered by ID
    async fn list_types(&self) -> DomainResult<Vec<TransportationType>>;

    async fn create_booking(
        &self,
        booking: NewTransportationBooking,
    ) -> DomainResult<TransportationBooking>;

    async fn find_booking(&self, id: i32) -> DomainResult<Option<TransportationBooking>>;

    /// A user's rides ordered by ID
    async fn find_bookings_by_user(&self, user_id: i32)
        -> DomainResult<Vec<TransportationBooking>>;

    async fn update_booking_status(
        &self,
        id: i32,
        status: BookingStatus,
    ) -> DomainResult<TransportationBooking>;
}
