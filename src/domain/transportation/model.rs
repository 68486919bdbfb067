//! Transportation domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use crate::domain::booking::BookingStatus;
use crate::domain::repositories::not_blank;

/// Kind of ride offered at a hub (cab, shuttle, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct TransportationType {
    pub id: i32,
    pub name: String,
    /// Icon tag for clients
    pub icon: String,
    pub base_rate: Decimal,
    pub per_km_rate: Decimal,
}

impl TransportationType {
    /// Price of a ride of `distance_km`
    pub fn quote(&self, distance_km: Decimal) -> Decimal {
        self.base_rate + self.per_km_rate * distance_km
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewTransportationType {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub icon: String,
    pub base_rate: Decimal,
    pub per_km_rate: Decimal,
}

/// A booked ride, optionally tied to a parking booking
#[derive(Debug, Clone, PartialEq)]
pub struct TransportationBooking {
    pub id: i32,
    pub user_id: i32,
    pub transportation_type_id: i32,
    pub parking_booking_id: Option<i32>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: DateTime<Utc>,
    pub is_shared: bool,
    pub status: BookingStatus,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewTransportationBooking {
    pub user_id: i32,
    pub transportation_type_id: i32,
    pub parking_booking_id: Option<i32>,
    #[validate(custom(function = "not_blank"))]
    pub pickup_location: String,
    #[validate(custom(function = "not_blank"))]
    pub dropoff_location: String,
    pub pickup_time: DateTime<Utc>,
    pub is_shared: bool,
    /// Defaults to `Pending` when not given
    pub status: Option<BookingStatus>,
    pub amount: Decimal,
}
