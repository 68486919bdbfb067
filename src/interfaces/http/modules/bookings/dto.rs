//! Booking DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Booking;

/// Parking booking in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub spot_id: i32,
    pub location_id: i32,
    pub start_time: String,
    pub end_time: String,
    /// `pending`, `confirmed`, `canceled` or `completed`
    pub status: String,
    pub booking_code: String,
    #[schema(value_type = String, example = "16.50")]
    pub total_amount: Decimal,
    pub is_favorite: bool,
    pub created_at: String,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            vehicle_id: b.vehicle_id,
            spot_id: b.spot_id,
            location_id: b.location_id,
            start_time: b.start_time.to_rfc3339(),
            end_time: b.end_time.to_rfc3339(),
            status: b.status.as_str().to_string(),
            booking_code: b.booking_code,
            total_amount: b.total_amount,
            is_favorite: b.is_favorite,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// Book the first free spot at a location
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(range(min = 1))]
    pub vehicle_id: i32,
    #[validate(range(min = 1))]
    pub location_id: i32,
    /// RFC 3339, e.g. `2030-05-01T09:00:00Z`
    pub start_time: String,
    pub end_time: String,
}

/// Owner edits; spot and status are not editable here
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    #[validate(range(min = 1))]
    pub vehicle_id: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FavoriteRequest {
    pub is_favorite: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FarePreviewQuery {
    pub start_time: String,
    pub end_time: String,
    /// Decimal string, e.g. `5.00`
    pub hourly_rate: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FarePreviewDto {
    pub billable_hours: i64,
    #[schema(value_type = String)]
    pub hourly_rate: Decimal,
    #[schema(value_type = String)]
    pub booking_fee: Decimal,
    #[schema(value_type = String)]
    pub total: Decimal,
}
