pub mod bookings;
pub mod health;
pub mod locations;
pub mod metrics;
pub mod transportation;
pub mod vehicles;
