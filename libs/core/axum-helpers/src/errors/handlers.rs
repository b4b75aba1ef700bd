use axum::{http::StatusCode, response::Response};

use super::{messages, text_response};

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    text_response(StatusCode::NOT_FOUND, messages::NOT_FOUND_RESOURCE)
}
