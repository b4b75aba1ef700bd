//! Handler tests for the Users domain
//!
//! These drive the users router in-process against the in-memory repository:
//! - request parsing (JSON and URL-encoded forms)
//! - status codes and plain-text confirmations
//! - list shape, including 204 for an empty store
//! - storage failures surfacing as a generic 500

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::errors::messages::INTERNAL_ERROR;
use domain_users::handlers::{USER_CREATED, USER_DELETED, USER_UPDATED};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

async fn text_body(body: Body) -> String {
    String::from_utf8(body_bytes(body).await).unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, email: &str, username: &str) -> StatusCode {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "email": email, "username": username }),
        ))
        .await
        .unwrap()
        .status()
}

async fn list(app: &Router) -> (StatusCode, Vec<UserResponse>) {
    let response = app.clone().oneshot(empty_request("GET", "/")).await.unwrap();
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        assert!(body_bytes(response.into_body()).await.is_empty());
        return (status, Vec::new());
    }
    let list: UserListResponse = json_body(response.into_body()).await;
    (status, list.users)
}

#[tokio::test]
async fn test_create_user_returns_201_with_confirmation() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_create_201");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "email": builder.email("alice"), "username": builder.username("alice") }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/users/"));
    assert_eq!(text_body(response.into_body()).await, USER_CREATED);

    let (_, users) = list(&app).await;
    assert_eq!(location, format!("/users/{}", users[0].id));
}

#[tokio::test]
async fn test_create_user_accepts_form_body() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("email=form%40example.com&username=former"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (_, users) = list(&app).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "form@example.com");
    assert_eq!(users[0].username, "former");
}

#[tokio::test]
async fn test_create_user_invalid_email_is_400() {
    let app = app();

    for email in ["", "plainaddress", "a@b", "a b@c.com", "a@@b.com"] {
        assert_eq!(
            create(&app, email, "someone").await,
            StatusCode::BAD_REQUEST,
            "email {email:?}"
        );
    }

    let (status, _) = list(&app).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_create_user_empty_or_missing_username_is_400() {
    let app = app();

    assert_eq!(create(&app, "a@b.com", "").await, StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "email": "a@b.com" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        text_body(response.into_body()).await,
        "Username is required"
    );

    // Any non-empty username is fine
    assert_eq!(create(&app, "a@b.com", " ").await, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_user_malformed_json_is_400() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"email\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_then_list_contains_user_once() {
    let app = app();
    assert_eq!(create(&app, "once@example.com", "once").await, StatusCode::CREATED);
    assert_eq!(create(&app, "other@example.com", "other").await, StatusCode::CREATED);

    let (status, users) = list(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        users.iter().filter(|u| u.email == "once@example.com").count(),
        1
    );
    // Creation order
    assert_eq!(users[0].username, "once");
    assert_eq!(users[1].username, "other");
}

#[tokio::test]
async fn test_duplicate_email_is_409_and_first_remains() {
    let app = app();
    assert_eq!(create(&app, "dup@example.com", "first").await, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "email": "dup@example.com", "username": "second" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        text_body(response.into_body()).await,
        "A user with that email already exists"
    );

    let (_, users) = list(&app).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "first");
}

#[tokio::test]
async fn test_duplicate_username_is_409() {
    let app = app();
    assert_eq!(create(&app, "one@example.com", "taken").await, StatusCode::CREATED);
    assert_eq!(create(&app, "two@example.com", "taken").await, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_empty_store_is_204_without_body() {
    let response = app().oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_list_wraps_users_in_object() {
    let app = app();
    create(&app, "wrap@example.com", "wrap").await;

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let value: serde_json::Value = json_body(response.into_body()).await;
    let users = value["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "wrap@example.com");
    assert!(users[0]["id"].is_string());
}

#[tokio::test]
async fn test_update_nonexistent_is_404_and_creates_nothing() {
    let app = app();
    let id = uuid::Uuid::now_v7();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{id}"),
            json!({ "email": "ghost@example.com", "username": "ghost" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (status, _) = list(&app).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_revalidates_input() {
    let app = app();
    create(&app, "valid@example.com", "valid").await;
    let (_, users) = list(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", users[0].id),
            json!({ "email": "not-an-email", "username": "valid" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, users) = list(&app).await;
    assert_eq!(users[0].email, "valid@example.com");
}

#[tokio::test]
async fn test_update_into_taken_username_is_409() {
    let app = app();
    create(&app, "a@example.com", "alpha").await;
    create(&app, "b@example.com", "beta").await;
    let (_, users) = list(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", users[1].id),
            json!({ "email": "b@example.com", "username": "alpha" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_then_list_excludes_and_second_delete_is_404() {
    let app = app();
    create(&app, "keep@example.com", "keep").await;
    create(&app, "drop@example.com", "drop").await;
    let (_, users) = list(&app).await;
    let dropped = users.iter().find(|u| u.username == "drop").unwrap().id;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{dropped}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response.into_body()).await, USER_DELETED);

    let (_, users) = list(&app).await;
    assert!(users.iter().all(|u| u.id != dropped));
    assert_eq!(users.len(), 1);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/{dropped}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let app = app();

    for (method, body) in [
        ("GET", None),
        ("DELETE", None),
        ("PUT", Some(json!({ "email": "a@b.com", "username": "a" }))),
    ] {
        let request = match body {
            Some(body) => json_request(method, "/not-a-uuid", body),
            None => empty_request(method, "/not-a-uuid"),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method}");
    }
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = app();

    // Create
    assert_eq!(
        create(&app, "life@example.com", "lifer").await,
        StatusCode::CREATED
    );

    // List shows exactly one entry
    let (status, users) = list(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.len(), 1);
    let id = users[0].id;

    // Update
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{id}"),
            json!({ "email": "renamed@example.com", "username": "renamed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response.into_body()).await, USER_UPDATED);

    // Read back the new fields
    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user.id, id);
    assert_eq!(user.email, "renamed@example.com");
    assert_eq!(user.username, "renamed");

    // Delete
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gone
    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (status, _) = list(&app).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

/// Repository whose backend is always down
struct FailingRepository;

const FAILURE_DETAIL: &str = "connection reset by 10.0.0.7:27017";

fn failure() -> UserError {
    UserError::Database(FAILURE_DETAIL.to_string())
}

#[async_trait::async_trait]
impl UserRepository for FailingRepository {
    async fn create(&self, _input: UserInput) -> UserResult<User> {
        Err(failure())
    }

    async fn list_all(&self) -> UserResult<Vec<User>> {
        Err(failure())
    }

    async fn find_by_id(&self, _id: Uuid) -> UserResult<Option<User>> {
        Err(failure())
    }

    async fn update(&self, _id: Uuid, _input: UserInput) -> UserResult<User> {
        Err(failure())
    }

    async fn delete(&self, _id: Uuid) -> UserResult<()> {
        Err(failure())
    }
}

#[tokio::test]
async fn test_storage_failure_is_generic_plain_text_500() {
    let app = handlers::router(UserService::new(FailingRepository));
    let id = Uuid::now_v7();
    let valid = json!({ "email": "a@b.com", "username": "alice" });

    let requests = [
        json_request("POST", "/", valid.clone()),
        empty_request("GET", "/"),
        empty_request("GET", &format!("/{id}")),
        json_request("PUT", &format!("/{id}"), valid),
        empty_request("DELETE", &format!("/{id}")),
    ];

    for request in requests {
        let route = format!("{} {}", request.method(), request.uri());
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{route}");
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"), "{route}: {content_type}");

        let body = text_body(response.into_body()).await;
        assert_eq!(body, INTERNAL_ERROR, "{route}");
        assert!(!body.contains("10.0.0.7"), "{route}");
    }
}
