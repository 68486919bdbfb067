//! Spot aggregate
//!
//! A single parking bay belonging to exactly one location.

pub mod model;
pub mod repository;

pub use model::{NewSpot, Spot, SpotFilter, SpotPatch, SpotType};
pub use repository::SpotRepository;
