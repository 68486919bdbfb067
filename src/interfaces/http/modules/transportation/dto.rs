//! Transportation DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{TransportationBooking, TransportationType};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransportationTypeDto {
    pub id: i32,
    pub name: String,
    pub icon: String,
    #[schema(value_type = String, example = "3.50")]
    pub base_rate: Decimal,
    #[schema(value_type = String, example = "1.50")]
    pub per_km_rate: Decimal,
}

impl From<TransportationType> for TransportationTypeDto {
    fn from(t: TransportationType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            icon: t.icon,
            base_rate: t.base_rate,
            per_km_rate: t.per_km_rate,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRideRequest {
    #[validate(range(min = 1))]
    pub transportation_type_id: i32,
    /// Parking booking this ride connects to
    pub parking_booking_id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub pickup_location: String,
    #[validate(length(min = 1, max = 255))]
    pub dropoff_location: String,
    /// RFC 3339
    pub pickup_time: String,
    #[serde(default)]
    pub is_shared: bool,
    /// Trip length; negative values are rejected
    #[schema(value_type = Option<String>, example = "4.0")]
    pub distance_km: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RideDto {
    pub id: i32,
    pub user_id: i32,
    pub transportation_type_id: i32,
    pub parking_booking_id: Option<i32>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: String,
    pub is_shared: bool,
    pub status: String,
    #[schema(value_type = String, example = "9.50")]
    pub amount: Decimal,
    pub created_at: String,
}

impl From<TransportationBooking> for RideDto {
    fn from(r: TransportationBooking) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            transportation_type_id: r.transportation_type_id,
            parking_booking_id: r.parking_booking_id,
            pickup_location: r.pickup_location,
            dropoff_location: r.dropoff_location,
            pickup_time: r.pickup_time.to_rfc3339(),
            is_shared: r.is_shared,
            status: r.status.as_str().to_string(),
            amount: r.amount,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}
