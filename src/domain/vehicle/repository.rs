//! Vehicle repository interface

use async_trait::async_trait;

use super::model::{NewVehicle, Vehicle};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: NewVehicle) -> DomainResult<Vehicle>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>>;

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Vehicle>>;

    /// Remove a vehicle; `NotFound` when absent
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
