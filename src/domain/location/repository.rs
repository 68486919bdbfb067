//! Location repository interface

use async_trait::async_trait;

use super::model::{Location, LocationPatch, NewLocation};
use crate::domain::DomainResult;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Store a new location and return it with its assigned ID
    async fn create(&self, location: NewLocation) -> DomainResult<Location>;

    /// Find location by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Location>>;

    /// All locations ordered by ID
    async fn find_all(&self) -> DomainResult<Vec<Location>>;

    /// Merge the patch into an existing location
    async fn update(&self, id: i32, patch: LocationPatch) -> DomainResult<Location>;

    /// Fold one review score into the running average as a single atomic step
    async fn add_review(&self, id: i32, score: f64) -> DomainResult<Location>;
}
