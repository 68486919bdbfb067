//! Locations, their spots and spot availability

pub mod dto;
pub mod handlers;

pub use handlers::*;
