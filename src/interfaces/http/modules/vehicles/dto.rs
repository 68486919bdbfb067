//! Vehicle DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{NewVehicle, Vehicle};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    pub id: i32,
    pub user_id: i32,
    pub license_plate: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub created_at: String,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            license_plate: v.license_plate,
            make: v.make,
            model: v.model,
            color: v.color,
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 16))]
    pub license_plate: String,
    #[validate(length(max = 64))]
    pub make: Option<String>,
    #[validate(length(max = 64))]
    pub model: Option<String>,
    #[validate(length(max = 32))]
    pub color: Option<String>,
}

impl CreateVehicleRequest {
    pub fn into_new_vehicle(self, user_id: i32) -> NewVehicle {
        NewVehicle {
            user_id,
            license_plate: self.license_plate,
            make: self.make,
            model: self.model,
            color: self.color,
        }
    }
}
