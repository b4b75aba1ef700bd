use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{FormOrJson, UuidPath};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{UserInput, UserListResponse, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const USER_CREATED: &str = "User created successfully";
pub const USER_UPDATED: &str = "User updated successfully";
pub const USER_DELETED: &str = "User deleted successfully";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(schemas(UserInput, UserResponse, UserListResponse)),
    tags(
        (name = "Users", description = "User management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// List all users
///
/// An empty collection answers 204 with no body.
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All users in creation order", body = UserListResponse),
        (status = 204, description = "No users exist"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Response> {
    let users = service.list_users().await?;

    if users.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(UserListResponse::from(users)).into_response())
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body(
        content(
            (UserInput = "application/json"),
            (UserInput = "application/x-www-form-urlencoded")
        ),
        description = "Email and username of the new user"
    ),
    responses(
        (status = 201, description = "User created", body = String, content_type = "text/plain",
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Invalid email or username", body = String, content_type = "text/plain"),
        (status = 409, description = "Email or username already taken", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    FormOrJson(input): FormOrJson<UserInput>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/users/{}", user.id))],
        USER_CREATED,
    ))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed user ID", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(Json(user.into()))
}

/// Replace a user's email and username
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body(
        content(
            (UserInput = "application/json"),
            (UserInput = "application/x-www-form-urlencoded")
        ),
        description = "New email and username"
    ),
    responses(
        (status = 200, description = "User updated", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid input or malformed user ID", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 409, description = "Email or username already taken", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    FormOrJson(input): FormOrJson<UserInput>,
) -> UserResult<&'static str> {
    service.update_user(id, input).await?;
    Ok(USER_UPDATED)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed user ID", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<&'static str> {
    service.delete_user(id).await?;
    Ok(USER_DELETED)
}
