//! `GET /query`: invoices billed at exactly 666 and who they were billed to.

use crate::handlers::error_message;
use crate::models::{InvoiceAmount, QueryResult};
use crate::services::{record_error, record_query_request};
use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service_core::error::AppError;

/// Failure of the invoice lookup, reported with the driver's error fields.
#[derive(Debug)]
pub struct QueryError(pub AppError);

#[derive(Debug, Serialize)]
struct DriverError {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraint: Option<String>,
}

#[derive(Debug, Serialize)]
struct QueryErrorBody {
    error: DriverError,
}

impl From<&AppError> for DriverError {
    fn from(err: &AppError) -> Self {
        let db_err = err.database_error();
        Self {
            message: error_message(err),
            code: db_err.and_then(|e| e.code()).map(|c| c.into_owned()),
            table: db_err.and_then(|e| e.table()).map(str::to_string),
            constraint: db_err.and_then(|e| e.constraint()).map(str::to_string),
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let body = QueryErrorBody {
            error: DriverError::from(&self.0),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<QueryResult<InvoiceAmount>>, QueryError> {
    match state.db.list_invoices().await {
        Ok(result) => {
            record_query_request("success");
            tracing::debug!(row_count = result.row_count, "Invoice query completed");
            Ok(Json(result))
        }
        Err(e) => {
            record_query_request("failure");
            record_error("query");
            tracing::error!(error = %e, "Invoice query failed");
            Err(QueryError(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_driver_failures_report_only_a_message() {
        let err = AppError::DatabaseError(
            anyhow::Error::new(sqlx::Error::PoolTimedOut).context("Failed to acquire connection"),
        );
        let body = serde_json::to_value(QueryErrorBody {
            error: DriverError::from(&err),
        })
        .unwrap();

        let error = body["error"].as_object().unwrap();
        assert!(error["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to acquire connection"));
        assert!(!error.contains_key("code"));
        assert!(!error.contains_key("table"));
    }

    #[test]
    fn query_error_is_a_500() {
        let response = QueryError(AppError::ServiceUnavailable).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
