//! # Transit Parking
//!
//! Parking spot booking at transit hubs, with last-mile transportation.
//!
//! ## Architecture
//!
//! - **domain**: entities, typed patches/filters and repository traits
//! - **application**: availability resolver, booking orchestrator, fares,
//!   transportation and provisioning services
//! - **infrastructure**: in-memory and SeaORM (SQLite) storage backends
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{BookingService, ProvisioningService, TransportationService};
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStore, SeaOrmRepositoryProvider};
pub use interfaces::{create_api_router, ApiContext};
