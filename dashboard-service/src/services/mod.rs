//! Services module for dashboard-service.

pub mod database;
pub mod metrics;

pub use database::{Database, SeedReport};
pub use metrics::{
    get_metrics, init_metrics, record_error, record_query_request, record_seed_run,
    record_seeded_rows,
};
