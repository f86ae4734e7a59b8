use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use evreg::domain::config::ApiConfig;
use evreg::domain::models::{Principal, PrincipalProfile};
use evreg_server::Server;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

async fn app() -> (TempDir, Router) {
    let tmp = TempDir::new().unwrap();
    let mut cfg = ApiConfig::default();
    cfg.storage.data_dir = tmp.path().to_path_buf();
    cfg.security.admins = vec![Principal {
        username: "admin".into(),
        password: "secret".into(),
        profile: PrincipalProfile {
            name: "Office".into(),
            email: "office@campus.edu".into(),
            ..PrincipalProfile::default()
        },
    }];

    let server = Server::builder().config(cfg).build().await.unwrap();
    (tmp, server.into_router())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn call_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = call(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn root_and_health_respond() {
    let (_tmp, app) = app().await;

    let (status, body) = call(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Backend is running!");

    let (status, _) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn registration_lifecycle() {
    let (_tmp, app) = app().await;

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/register",
        Some(json!({ "name": "Ada", "studentId": "202300000001", "events": ["Chess"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["registration"]["studentId"], "202300000001");

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/register",
        Some(json!({ "name": "Bob", "studentId": "202300000001", "events": ["Art"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "status": "fail", "error": "Student ID already registered." }));

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/register",
        Some(json!({ "studentId": "12345", "events": ["Art"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Student ID must be exactly 12 digits.");

    let (_, list) = call_json(&app, Method::GET, "/registrations", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = call_json(&app, Method::DELETE, "/registrations", Some(json!({ "index": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid index");

    let (status, _) = call_json(&app, Method::DELETE, "/registrations", Some(json!({ "index": 0 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = call_json(&app, Method::GET, "/registrations", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn disabling_an_event_prunes_registrations() {
    let (_tmp, app) = app().await;

    for name in ["Chess", "Art"] {
        let (status, body) =
            call_json(&app, Method::POST, "/add_event", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["enabled"], true);
    }

    let (status, _) = call_json(&app, Method::POST, "/add_event", Some(json!({ "name": "Chess" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    call_json(
        &app,
        Method::POST,
        "/register",
        Some(json!({ "studentId": "202300000001", "events": ["Chess", "Art"] })),
    )
    .await;
    call_json(&app, Method::POST, "/register", Some(json!({ "studentId": "202300000002", "events": ["Chess"] })))
        .await;

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/events/enabled",
        Some(json!({ "enabled_map": { "Chess": false } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (_, registrations) = call_json(&app, Method::GET, "/registrations", None).await;
    assert_eq!(registrations.as_array().unwrap().len(), 1);
    assert_eq!(registrations[0]["events"], json!(["Art"]));

    let (_, events) = call_json(&app, Method::GET, "/events", None).await;
    assert_eq!(events[0]["enabled"], false);
}

#[tokio::test]
async fn deleting_an_event_cascades() {
    let (_tmp, app) = app().await;

    call_json(&app, Method::POST, "/add_event", Some(json!({ "name": "Chess" }))).await;
    call_json(&app, Method::POST, "/register", Some(json!({ "studentId": "202300000001", "events": ["Chess"] })))
        .await;
    call_json(&app, Method::POST, "/register", Some(json!({ "studentId": "202300000002", "events": ["Art"] })))
        .await;

    let (status, _) = call_json(&app, Method::DELETE, "/events", Some(json!({ "index": 0 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, events) = call_json(&app, Method::GET, "/events", None).await;
    assert_eq!(events, json!([]));
    let (_, registrations) = call_json(&app, Method::GET, "/registrations", None).await;
    assert_eq!(registrations[0]["studentId"], "202300000002");
    assert_eq!(registrations.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn export_serves_an_attachment() {
    let (_tmp, app) = app().await;
    call_json(
        &app,
        Method::POST,
        "/register",
        Some(json!({ "studentId": "202300000001", "gender": "Female", "events": ["Sports"], "sports": ["Tennis"] })),
    )
    .await;

    let request = Request::builder().uri("/export-excel?event=Sports").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], evreg::features::reports::XLSX_MIME);
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("Sports_registrations.xlsx"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn oversized_registration_cannot_break_the_export() {
    let (_tmp, app) = app().await;

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/register",
        Some(json!({ "name": "x".repeat(40_000), "studentId": "202300000001", "events": ["Chess"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "A registration field is too long.");

    let (status, bytes) = call(&app, Method::GET, "/export-excel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn admin_login_checks_configured_principals() {
    let (_tmp, app) = app().await;

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/admin-login",
        Some(json!({ "username": " ADMIN ", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["admin"], "admin");
    assert_eq!(body["profile"]["email"], "office@campus.edu");

    let (status, body) =
        call_json(&app, Method::POST, "/admin-login", Some(json!({ "username": "admin", "password": "nope" })))
            .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "status": "fail", "error": "Invalid credentials" }));
}

#[tokio::test]
async fn contact_admin_validates_and_logs() {
    let (_tmp, app) = app().await;

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/contact-admin",
        Some(json!({ "name": "Ada", "email": " ", "message": "Hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required.");

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/contact-admin",
        Some(json!({ "name": "Ada", "email": "ada@campus.edu", "message": "Hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));
}

#[tokio::test]
async fn malformed_json_is_a_fail_envelope() {
    let (_tmp, app) = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "fail");
}
