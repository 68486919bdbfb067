//! Interface adapters: the REST API

pub mod http;

pub use http::{create_api_router, ApiContext};
