//! Dashboard Service - invoice queries and fixture seeding for the Acme dashboard.

pub mod config;
pub mod fixtures;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;
