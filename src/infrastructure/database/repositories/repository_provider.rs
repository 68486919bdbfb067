//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::location::LocationRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::spot::SpotRepository;
use crate::domain::transportation::TransportationRepository;
use crate::domain::vehicle::VehicleRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::location_repository::SeaOrmLocationRepository;
use super::spot_repository::SeaOrmSpotRepository;
use super::transportation_repository::SeaOrmTransportationRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let location = repos.locations().find_by_id(1).await?;
/// let active = repos.bookings().find_active_for_location(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    locations: SeaOrmLocationRepository,
    spots: SeaOrmSpotRepository,
    bookings: SeaOrmBookingRepository,
    vehicles: SeaOrmVehicleRepository,
    transportation: SeaOrmTransportationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            locations: SeaOrmLocationRepository::new(db.clone()),
            spots: SeaOrmSpotRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            transportation: SeaOrmTransportationRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn locations(&self) -> &dyn LocationRepository {
        &self.locations
    }

    fn spots(&self) -> &dyn SpotRepository {
        &self.spots
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn transportation(&self) -> &dyn TransportationRepository {
        &self.transportation
    }
}
