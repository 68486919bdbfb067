//! Location aggregate
//!
//! A transit hub parking facility with its hourly rate and review aggregate.

pub mod model;
pub mod repository;

pub use model::{Location, LocationPatch, NewLocation};
pub use repository::LocationRepository;
