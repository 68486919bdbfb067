//! Spot repository interface

use async_trait::async_trait;

use super::model::{NewSpot, Spot, SpotFilter, SpotPatch};
use crate::domain::DomainResult;

#[async_trait]
pub trait SpotRepository: Send + Sync {
    /// Store a new spot (available by default)
    async fn create(&self, spot: NewSpot) -> DomainResult<Spot>;

    /// Find spot by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Spot>>;

    /// Spots matching the filter, in creation (ID) order
    async fn find_where(&self, filter: SpotFilter) -> DomainResult<Vec<Spot>>;

    /// Merge the patch into an existing spot
    async fn update(&self, id: i32, patch: SpotPatch) -> DomainResult<Spot>;
}
