//! Black-box tests for the HTTP surface.
//!
//! Drives the real router in-process against an in-memory database, the
//! same wiring the server binary uses.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use tally_api::{AppState, create_router};
use tally_db::migration::{Migrator, MigratorTrait};
use tally_shared::{JwtConfig, JwtService};

async fn setup() -> (Router, sea_orm::DatabaseConnection) {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");

    let jwt_service = JwtService::new(&JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
    });

    let app = create_router(AppState {
        db: Arc::new(db.clone()),
        jwt_service: Arc::new(jwt_service),
    });
    (app, db)
}

async fn setup_app() -> Router {
    setup().await.0
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        // Raw token value, no scheme prefix
        builder = builder.header(header::AUTHORIZATION, token);
    }

    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, username: &str, password: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": username, "password": password })),
        ))
        .await
        .unwrap();
    response.status()
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/login",
            None,
            Some(json!({ "username": username, "password": password })),
        ))
        .await
        .unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let response = app
        .oneshot(json_request("GET", "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_returns_username_only() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "password": "secret1" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["msg"], "Registered");
    assert_eq!(body["user"]["username"], "alice");
    // The hash must never leave the server
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = setup_app().await;

    assert_eq!(register(&app, "alice", "secret1").await, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "password": "other" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Username already exists");

    // The first registration still works
    let (status, _) = login(&app, "alice", "secret1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_insert_failure_is_a_server_error() {
    use sea_orm::ConnectionTrait;

    let (app, db) = setup().await;

    // Break the insert path only; the existence pre-check still succeeds
    db.execute_unprepared(
        "CREATE TRIGGER users_insert_unavailable BEFORE INSERT ON users \
         BEGIN SELECT RAISE(ABORT, 'storage unavailable'); END",
    )
    .await
    .expect("Failed to create trigger");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "password": "secret1" })),
        ))
        .await
        .unwrap();

    // A store failure that is not a duplicate must not be reported as one
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Something went wrong");
}

#[tokio::test]
async fn test_register_rejects_empty_fields() {
    let app = setup_app().await;

    for payload in [
        json!({ "username": "", "password": "secret1" }),
        json!({ "username": "alice", "password": "" }),
        json!({}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/users/register", None, Some(payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = setup_app().await;
    assert_eq!(register(&app, "alice", "secret1").await, StatusCode::OK);

    let (wrong_pw_status, wrong_pw_body) = login(&app, "alice", "wrong").await;
    let (unknown_status, unknown_body) = login(&app, "nobody", "anything").await;

    assert_eq!(wrong_pw_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    // Identical error value for both causes
    assert_eq!(wrong_pw_body, unknown_body);
    assert_eq!(wrong_pw_body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_transactions_require_token() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/transactions", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["error"], "No token");

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/transactions",
            Some("garbage-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let app = setup_app().await;
    assert_eq!(register(&app, "alice", "secret1").await, StatusCode::OK);
    let (_, body) = login(&app, "alice", "secret1").await;
    let token = body["token"].as_str().unwrap().to_string();

    for payload in [
        json!({ "amount": 10.0, "type": "income" }),
        json!({ "text": "", "amount": 10.0, "type": "income" }),
        json!({ "text": "Salary", "type": "income" }),
        json!({ "text": "Salary", "amount": 10.0 }),
        json!({ "text": "Salary", "amount": 10.0, "type": "transfer" }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/transactions",
                Some(&token),
                Some(payload),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_list_rejects_unparsable_dates() {
    let app = setup_app().await;
    assert_eq!(register(&app, "alice", "secret1").await, StatusCode::OK);
    let (_, body) = login(&app, "alice", "secret1").await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/transactions?start=not-a-date",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_users_cannot_see_each_others_ledgers() {
    let app = setup_app().await;
    for (user, pw) in [("alice", "secret1"), ("bob", "secret2")] {
        assert_eq!(register(&app, user, pw).await, StatusCode::OK);
    }
    let (_, body) = login(&app, "alice", "secret1").await;
    let alice_token = body["token"].as_str().unwrap().to_string();
    let (_, body) = login(&app, "bob", "secret2").await;
    let bob_token = body["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/transactions",
            Some(&alice_token),
            Some(json!({ "text": "Salary", "amount": 1000.0, "type": "income" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = response_json(response).await;
    let created_id = created["id"].as_str().unwrap().to_string();

    // Bob sees nothing
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/transactions", Some(&bob_token), None))
        .await
        .unwrap();
    let bob_list = response_json(response).await;
    assert_eq!(bob_list.as_array().unwrap().len(), 0);

    // Bob deleting Alice's record still acknowledges success
    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/transactions/{created_id}"),
            Some(&bob_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["msg"], "Deleted");

    // ...but Alice's record is untouched
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/transactions", Some(&alice_token), None))
        .await
        .unwrap();
    let alice_list = response_json(response).await;
    assert_eq!(alice_list.as_array().unwrap().len(), 1);
    assert_eq!(alice_list[0]["id"], created_id.as_str());
}

#[tokio::test]
async fn test_end_to_end_ledger_flow() {
    let app = setup_app().await;

    // register alice/secret1 -> 200
    assert_eq!(register(&app, "alice", "secret1").await, StatusCode::OK);

    // login with the wrong password -> 400 {error: "Invalid credentials"}
    let (status, body) = login(&app, "alice", "wrong").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid credentials");

    // login with the right password -> 200 with token
    let (status, body) = login(&app, "alice", "secret1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    let token = body["token"].as_str().unwrap().to_string();

    // create a transaction -> 200 with generated id and date ~ now
    let before = chrono::Utc::now();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/transactions",
            Some(&token),
            Some(json!({ "text": "Salary", "amount": 1000.0, "type": "income" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = response_json(response).await;
    assert_eq!(created["text"], "Salary");
    assert_eq!(created["type"], "income");
    assert!((created["amount"].as_f64().unwrap() - 1000.0).abs() < f64::EPSILON);
    let created_id = created["id"].as_str().unwrap().to_string();
    let date: chrono::DateTime<chrono::Utc> =
        created["date"].as_str().unwrap().parse().unwrap();
    assert!(date >= before - chrono::Duration::seconds(1));
    assert!(date <= chrono::Utc::now() + chrono::Duration::seconds(1));

    // filtered list contains it
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/transactions?type=income",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = response_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created_id.as_str());

    // delete it -> 200 {msg: "Deleted"}
    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/transactions/{created_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["msg"], "Deleted");

    // subsequent list is empty
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/transactions", Some(&token), None))
        .await
        .unwrap();
    let listed = response_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}
