//! HTTP adapter for savings endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use routes::savings_routes;
