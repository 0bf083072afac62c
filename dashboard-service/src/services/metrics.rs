//! Prometheus metrics for dashboard-service.
//!
//! Service counters live in the default `prometheus` registry. Per-request
//! HTTP metrics come from the `metrics` facade used by the shared middleware
//! and are rendered by the recorder installed here.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

/// Counter for invoice query requests by status.
pub static QUERY_REQUESTS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "dashboard_query_requests_total",
        "Total number of invoice query requests",
        &["status"]
    )
    .expect("Failed to register QUERY_REQUESTS")
});

/// Histogram for database query duration by operation.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "dashboard_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Counter for seed runs by outcome.
pub static SEED_RUNS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "dashboard_seed_runs_total",
        "Total number of database seed runs",
        &["status"]
    )
    .expect("Failed to register SEED_RUNS")
});

/// Counter for rows actually inserted by seeding, per table.
pub static SEEDED_ROWS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "dashboard_seeded_rows_total",
        "Total number of rows inserted by seeding",
        &["table"]
    )
    .expect("Failed to register SEEDED_ROWS")
});

/// Counter for errors.
pub static ERRORS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "dashboard_errors_total",
        "Total number of errors",
        &["error_type"]
    )
    .expect("Failed to register ERRORS")
});

/// Recorder behind the `metrics` facade. `None` when another recorder was
/// already installed in this process.
static HTTP_METRICS: Lazy<Option<PrometheusHandle>> = Lazy::new(|| {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install HTTP metrics recorder");
            None
        }
    }
});

/// Initialize all metrics (forces lazy initialization).
///
/// Safe to call more than once; the recorder is installed on first use.
pub fn init_metrics() {
    Lazy::force(&HTTP_METRICS);
    Lazy::force(&QUERY_REQUESTS);
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&SEED_RUNS);
    Lazy::force(&SEEDED_ROWS);
    Lazy::force(&ERRORS);
}

/// Get all metrics as Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    let mut text = String::from_utf8(buffer).unwrap_or_default();

    if let Some(handle) = HTTP_METRICS.as_ref() {
        text.push_str(&handle.render());
    }
    text
}

/// Record an invoice query request.
pub fn record_query_request(status: &str) {
    QUERY_REQUESTS.with_label_values(&[status]).inc();
}

/// Record a seed run.
pub fn record_seed_run(status: &str) {
    SEED_RUNS.with_label_values(&[status]).inc();
}

/// Record rows inserted into one table.
pub fn record_seeded_rows(table: &str, rows: u64) {
    SEEDED_ROWS.with_label_values(&[table]).inc_by(rows as f64);
}

/// Record an error.
pub fn record_error(error_type: &str) {
    ERRORS.with_label_values(&[error_type]).inc();
}
