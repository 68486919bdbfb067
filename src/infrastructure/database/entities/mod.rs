//! Database entities module

pub mod booking;
pub mod location;
pub mod spot;
pub mod transportation_booking;
pub mod transportation_type;
pub mod vehicle;

pub use booking::Entity as Booking;
pub use location::Entity as Location;
pub use spot::Entity as Spot;
pub use transportation_booking::Entity as TransportationBooking;
pub use transportation_type::Entity as TransportationType;
pub use vehicle::Entity as Vehicle;
