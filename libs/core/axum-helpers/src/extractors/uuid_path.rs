//! UUID path parameter extractor.

use crate::errors::{AppError, messages};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Extractor for a single UUID path parameter.
///
/// A segment that is not a UUID is rejected with a 400 plain-text response
/// before the handler runs.
///
/// ```ignore
/// use axum::{Router, routing::delete};
/// use axum_helpers::UuidPath;
///
/// async fn delete_user(UuidPath(id): UuidPath) -> String {
///     format!("deleting {id}")
/// }
///
/// let app: Router = Router::new().route("/users/{id}", delete(delete_user));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Uuid::parse_str(&id).map(UuidPath).map_err(|_| {
            AppError::BadRequest(format!("{}: {}", messages::INVALID_UUID, id)).into_response()
        })
    }
}
