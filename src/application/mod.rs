//! Application layer: use-case services over the repository provider.

pub mod booking;
pub mod provisioning;
pub mod transportation;

pub use booking::{
    AvailabilityResolver, BookingPolicy, BookingRequest, BookingService, FareCalculator,
};
pub use provisioning::ProvisioningService;
pub use transportation::{TransportationRequest, TransportationService};
