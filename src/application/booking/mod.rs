//! Parking booking: availability, fares and the booking orchestrator

pub mod availability;
pub mod code;
pub mod fare;
pub mod locks;
pub mod service;

pub use availability::{free_spots, validate_interval, AvailabilityResolver};
pub use code::{generate_booking_code, BOOKING_CODE_PREFIX};
pub use fare::{compute_fare, FareCalculator, DEFAULT_BOOKING_FEE};
pub use locks::LocationLocks;
pub use service::{parse_timestamp, BookingPolicy, BookingRequest, BookingService};
