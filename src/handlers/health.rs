// src/handlers/health.rs

use axum::extract::State;

use crate::{common::error::AppError, config::AppState};

// GET /api/health
// Responde "OK" só se o banco também responder.
pub async fn health(State(app_state): State<AppState>) -> Result<&'static str, AppError> {
    sqlx::query("SELECT 1").execute(&app_state.db_pool).await?;
    Ok("OK")
}
