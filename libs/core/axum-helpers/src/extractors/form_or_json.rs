//! Request body extractor accepting JSON or URL-encoded forms.

use crate::errors::AppError;
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

/// Deserializes the body as `application/x-www-form-urlencoded` when the
/// request says so, and as JSON otherwise.
///
/// Rejections become [`AppError`] and render as 400 plain-text responses.
///
/// ```ignore
/// use axum_helpers::FormOrJson;
///
/// async fn create_user(FormOrJson(input): FormOrJson<UserInput>) -> String {
///     input.username
/// }
/// ```
pub struct FormOrJson<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(data) = Form::<T>::from_request(req, state).await?;
            Ok(FormOrJson(data))
        } else {
            let Json(data) = Json::<T>::from_request(req, state).await?;
            Ok(FormOrJson(data))
        }
    }
}
