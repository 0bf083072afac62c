//! HTTP handlers for dashboard-service.

pub mod health;
pub mod query;
pub mod seed;

use service_core::error::AppError;

/// The message a client sees for a failed request: the database's own
/// message when the failure came from the server, otherwise the full error
/// chain.
pub(crate) fn error_message(err: &AppError) -> String {
    if let Some(db_err) = err.database_error() {
        return db_err.message().to_string();
    }

    match err {
        AppError::DatabaseError(inner) | AppError::InternalError(inner) => format!("{:#}", inner),
        other => other.to_string(),
    }
}
