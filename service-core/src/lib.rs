//! service-core: Shared infrastructure for the dashboard services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
pub use serde;
pub use sqlx;
pub use tracing;
