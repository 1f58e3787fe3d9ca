use crate::core::error::DataAccessError;
use crate::core::state::AppState;
use crate::models::user::User;
use axum::{extract::State, response::Json};
use std::sync::Arc;
use tracing::info;

/// List every user
///
/// GET /test-trace
///
/// The repository opens the `SELECT users` span; a failed query becomes a 500.
pub async fn trigger_trace_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, DataAccessError> {
    info!("Starting trace request");

    let users = state.user_repository.find_all().await?;

    info!(users = users.len(), "Retrieved users");

    Ok(Json(users))
}
