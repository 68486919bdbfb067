//! Last-mile transportation booking

pub mod service;

pub use service::{default_transportation_types, TransportationRequest, TransportationService};
