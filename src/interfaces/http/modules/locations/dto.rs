//! Location and spot DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Location, NewLocation, NewSpot, Spot, SpotType};
use crate::interfaces::http::common::non_negative;

/// Location in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_spots: i32,
    #[schema(value_type = String, example = "5.00")]
    pub hourly_rate: Decimal,
    pub rating: f64,
    pub review_count: i32,
    pub has_transit_access: bool,
    pub created_at: String,
}

impl From<Location> for LocationDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            address: l.address,
            latitude: l.latitude,
            longitude: l.longitude,
            total_spots: l.total_spots,
            hourly_rate: l.hourly_rate,
            rating: l.rating,
            review_count: l.review_count,
            has_transit_access: l.has_transit_access,
            created_at: l.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub total_spots: i32,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = String, example = "5.00")]
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub has_transit_access: bool,
}

impl From<CreateLocationRequest> for NewLocation {
    fn from(r: CreateLocationRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
            latitude: r.latitude,
            longitude: r.longitude,
            total_spots: r.total_spots,
            hourly_rate: r.hourly_rate,
            has_transit_access: r.has_transit_access,
        }
    }
}

/// Operator price change
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLocationRequest {
    #[schema(value_type = Option<String>, example = "6.50")]
    pub hourly_rate: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewRequest {
    /// Score between 1 and 5
    #[validate(range(min = 1.0, max = 5.0))]
    pub score: f64,
}

/// Spot type on the wire
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SpotTypeDto {
    #[default]
    Standard,
    Accessible,
    Ev,
}

impl From<SpotType> for SpotTypeDto {
    fn from(t: SpotType) -> Self {
        match t {
            SpotType::Standard => Self::Standard,
            SpotType::Accessible => Self::Accessible,
            SpotType::Ev => Self::Ev,
        }
    }
}

impl From<SpotTypeDto> for SpotType {
    fn from(t: SpotTypeDto) -> Self {
        match t {
            SpotTypeDto::Standard => Self::Standard,
            SpotTypeDto::Accessible => Self::Accessible,
            SpotTypeDto::Ev => Self::Ev,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SpotDto {
    pub id: i32,
    pub location_id: i32,
    pub spot_number: String,
    pub level: Option<String>,
    pub section: Option<String>,
    /// Cached hint; see the availability endpoint for interval answers
    pub is_available: bool,
    pub spot_type: SpotTypeDto,
}

impl From<Spot> for SpotDto {
    fn from(s: Spot) -> Self {
        Self {
            id: s.id,
            location_id: s.location_id,
            spot_number: s.spot_number,
            level: s.level,
            section: s.section,
            is_available: s.is_available,
            spot_type: s.spot_type.into(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSpotRequest {
    #[validate(length(min = 1, max = 32))]
    pub spot_number: String,
    pub level: Option<String>,
    pub section: Option<String>,
    #[serde(default)]
    pub spot_type: SpotTypeDto,
}

impl CreateSpotRequest {
    pub fn into_new_spot(self, location_id: i32) -> NewSpot {
        NewSpot {
            location_id,
            spot_number: self.spot_number,
            level: self.level,
            section: self.section,
            spot_type: self.spot_type.into(),
        }
    }
}

/// Interval for availability queries (RFC 3339)
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// e.g. `2030-05-01T09:00:00Z`
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityDto {
    pub location_id: i32,
    pub start_time: String,
    pub end_time: String,
    pub available_count: usize,
    pub spots: Vec<SpotDto>,
}
