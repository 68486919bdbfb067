//! Vehicle domain entity

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::domain::repositories::not_blank;

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i32,
    pub user_id: i32,
    pub license_plate: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewVehicle {
    pub user_id: i32,
    #[validate(custom(function = "not_blank"), length(max = 16))]
    pub license_plate: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
}
