//! Booking aggregate
//!
//! Contains the parking Booking entity, its status lifecycle, and repository interface.

pub mod model;
pub mod repository;

pub use model::{
    intervals_conflict, Booking, BookingFilter, BookingPatch, BookingStatus, NewBooking,
};
pub use repository::BookingRepository;
