//! Health check handler.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::AppState;

/// Liveness probe with a database ping.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Errors
///
/// Returns 500 when the database does not answer.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await?;

    Ok(Json(json!({ "status": "ok" })))
}
