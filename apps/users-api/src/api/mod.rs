//! API routes module
//!
//! This module defines all HTTP routes of the users service.

pub mod health;
pub mod users;

use axum::{Router, routing::get};
use axum_helpers::health_router;

use crate::state::AppState;

/// Body of `GET /`
pub const ROOT_MESSAGE: &str = "Routes working";

/// Create all routes, mounted at the service root by `axum_helpers::create_router`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/users", users::router(state))
        .merge(health::router(state.clone()))
        .merge(health_router(state.config.app))
}

async fn root() -> &'static str {
    ROOT_MESSAGE
}
