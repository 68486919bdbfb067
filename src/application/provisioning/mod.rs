//! Operator-side setup of locations, spots and vehicles

pub mod service;

pub use service::ProvisioningService;
