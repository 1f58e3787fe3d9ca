// Centralized error handling for the service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failure while talking to the database.
///
/// Covers connectivity loss, malformed SQL, constraint violations and
/// column mapping mismatches alike. Nothing in the service recovers from it.
#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("Database query failed: {0}")]
    Query(#[from] sqlx::Error),
}

impl IntoResponse for DataAccessError {
    fn into_response(self) -> Response {
        error!(error = %self, "Data access failed");

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = match &self {
            RouteError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
