use crate::core::error::RouteError;
use axum::{http::Uri, response::Response, response::IntoResponse};

pub async fn fallback_handler(uri: Uri) -> Response {
    RouteError::NotFound(format!(
        "{}. Valid endpoints: GET /test-trace, POST /users, GET /health",
        uri.path()
    ))
    .into_response()
}
