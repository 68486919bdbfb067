//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::booking::BookingRepository;
use super::location::LocationRepository;
use super::spot::SpotRepository;
use super::transportation::TransportationRepository;
use super::vehicle::VehicleRepository;
use crate::shared::errors::DomainError;
use validator::ValidationError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Both the in-memory store and the SeaORM store implement this, and the
/// services only ever see `Arc<dyn RepositoryProvider>`:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let spots = repos.spots().find_where(SpotFilter::at_location(1)).await?;
///     let active = repos.bookings().find_active_for_location(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn locations(&self) -> &dyn LocationRepository;
    fn spots(&self) -> &dyn SpotRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn transportation(&self) -> &dyn TransportationRepository;
}

/// Field validator for required text: `length(min = 1)` alone lets
/// whitespace-only values through.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
