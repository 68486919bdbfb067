//! Vehicle aggregate (minimal: owners register plates used on bookings)

pub mod model;
pub mod repository;

pub use model::{NewVehicle, Vehicle};
pub use repository::VehicleRepository;
