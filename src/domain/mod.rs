//! Domain layer: aggregates and repository interfaces.

pub mod booking;
pub mod location;
pub mod repositories;
pub mod spot;
pub mod transportation;
pub mod vehicle;

pub use booking::{Booking, BookingFilter, BookingPatch, BookingRepository, BookingStatus, NewBooking};
pub use location::{Location, LocationPatch, LocationRepository, NewLocation};
pub use repositories::{DomainResult, RepositoryProvider};
pub use spot::{NewSpot, Spot, SpotFilter, SpotPatch, SpotRepository, SpotType};
pub use transportation::{
    NewTransportationBooking, NewTransportationType, TransportationBooking,
    TransportationRepository, TransportationType,
};
pub use vehicle::{NewVehicle, Vehicle, VehicleRepository};

pub use crate::shared::errors::DomainError;
