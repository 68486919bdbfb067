//! Last-mile transportation aggregate
//!
//! Reference data for cab/shuttle types plus the rides users book from a hub.
//! Vehicle capacity is not modelled, so there is no conflict rule here.

pub mod model;
pub mod repository;

pub use model::{
    NewTransportationBooking, NewTransportationType, TransportationBooking, TransportationType,
};
pub use repository::TransportationRepository;
