//! Last-mile rides from transit hubs

pub mod dto;
pub mod handlers;

pub use handlers::*;
