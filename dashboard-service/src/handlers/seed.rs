//! `GET /seed`: create the dashboard tables and load the fixture rows.

use crate::handlers::error_message;
use crate::services::{record_error, record_seed_run, SeedReport};
use crate::startup::AppState;
use crate::utils::hash_passwords;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service_core::error::AppError;

pub const SEED_SUCCESS_MESSAGE: &str = "Database seeded successfully";

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
}

/// A seed run that was rolled back.
#[derive(Debug)]
pub struct SeedError(pub AppError);

#[derive(Debug, Serialize)]
struct SeedErrorBody {
    error: String,
}

impl IntoResponse for SeedError {
    fn into_response(self) -> Response {
        let body = SeedErrorBody {
            error: error_message(&self.0),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedResponse>, SeedError> {
    match run_seed(&state).await {
        Ok(report) => {
            record_seed_run("success");
            tracing::info!(rows_inserted = report.total(), "Seed completed");
            Ok(Json(SeedResponse {
                message: SEED_SUCCESS_MESSAGE.to_string(),
            }))
        }
        Err(e) => {
            record_seed_run("failure");
            record_error("seed");
            tracing::error!(error = %e, "Seed failed, transaction rolled back");
            Err(SeedError(e))
        }
    }
}

/// Passwords are hashed before the transaction opens so the connection is
/// not held across CPU-bound work.
async fn run_seed(state: &AppState) -> Result<SeedReport, AppError> {
    let password_hashes = hash_passwords(state.fixtures.users.iter().map(|u| &u.password)).await?;
    state.db.seed(&state.fixtures, &password_hashes).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_error_body_is_a_flat_message() {
        let response =
            SeedError(AppError::BadRequest(anyhow::anyhow!("Invalid date"))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Bad request: Invalid date" }));
    }
}
