//! Parking bookings and fare previews

pub mod dto;
pub mod handlers;

pub use handlers::*;
