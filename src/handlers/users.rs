use crate::core::error::DataAccessError;
use crate::core::state::AppState;
use crate::models::user::{NewUser, User};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::info;

/// Create a user
///
/// POST /users  {"name": "...", "email": "..."}
///
/// Responds 201 with the stored user including its assigned id.
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), DataAccessError> {
    let user = state.user_repository.create(new_user).await?;

    info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}
