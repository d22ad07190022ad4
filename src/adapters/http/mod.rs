//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with dto/handlers/routes; `router` assembles
//! them behind the shared middleware stack.

pub mod error;
pub mod health;
pub mod payment;
pub mod router;
pub mod savings;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use health::{EnvCheck, HealthResponse};
pub use payment::payment_routes;
pub use router::{app_router, with_middleware, HttpSettings};
pub use savings::savings_routes;
pub use state::AppState;
