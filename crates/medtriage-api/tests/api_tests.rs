//! HTTP router tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use medtriage_api::{router, AppState};
use medtriage_core::{Database, NewMedication, PasswordHasher, TokenIssuer};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    let mut db = Database::open_in_memory().unwrap();
    db.seed_catalog(vec![
        NewMedication::new("Oseltamivir 75mg", "febre gripe"),
        NewMedication::new("Dipirona 500mg", "dor de cabeca enxaqueca").with_allergy_tags("dipirona"),
        NewMedication::new("Loratadina 10mg", "rinite alergia coceira"),
    ])
    .unwrap();

    let state = AppState::new(
        db,
        TokenIssuer::new(b"api-test-secret", 60),
        PasswordHasher::new(1_000),
    );
    router(state)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn register_and_login(app: &Router, username: &str, allergies: &str) -> String {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({"username": username, "password": "pw123", "allergies": allergies}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app, login_request(username, "pw123")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app();
    let (status, body) = send(&app, get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn register_hides_password_hash() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({"username": "ana", "password": "pw123", "full_name": "Ana Souza"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ana");
    assert_eq!(body["full_name"], "Ana Souza");
    assert_eq!(body["allergies"], "");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_registration_is_400() {
    let app = test_app();
    register_and_login(&app, "ana", "").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({"username": "ana", "password": "other"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "user exists");
}

#[tokio::test]
async fn malformed_register_body_is_400() {
    let app = test_app();
    let (status, _) = send(
        &app,
        json_request("POST", "/auth/register", None, json!({"username": "ana"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_401() {
    let app = test_app();
    register_and_login(&app, "ana", "").await;

    let response = app
        .clone()
        .oneshot(login_request("ana", "nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn me_requires_valid_token() {
    let app = test_app();
    let token = register_and_login(&app, "ana", "dipirona").await;

    let (status, body) = send(&app, get_request("/patients/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allergies"], "dipirona");

    let (status, _) = send(&app, get_request("/patients/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, get_request("/patients/me", Some("garbled"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "invalid token");
}

#[tokio::test]
async fn medications_listing_and_authenticated_write() {
    let app = test_app();

    let (status, _) = send(
        &app,
        json_request("POST", "/medications", None, json!({"name": "Ibuprofeno"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = register_and_login(&app, "ana", "").await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/medications",
            Some(&token),
            json!({"name": "Ibuprofeno 400mg", "indications": "dor inflamacao"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 4);
    assert_eq!(body["notes"], "");

    let (status, body) = send(&app, get_request("/medications", None)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn triage_and_recommendations() {
    let app = test_app();
    let token = register_and_login(&app, "ana", "dipirona").await;

    let (status, triage) = send(
        &app,
        json_request(
            "POST",
            "/triage",
            Some(&token),
            json!({"symptoms": "febre dor de cabeca"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(triage["status"], "pending");

    let uri = format!("/triage/{}/recommendations", triage["id"]);
    let (status, body) = send(&app, get_request(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let recs = body.as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["name"], "Oseltamivir 75mg");
    assert_eq!(recs[0]["score"], 1);
    assert_eq!(recs[0]["matched_terms"], json!(["febre"]));
}

#[tokio::test]
async fn empty_symptoms_is_400() {
    let app = test_app();
    let token = register_and_login(&app, "ana", "").await;

    let (status, _) = send(
        &app,
        json_request("POST", "/triage", Some(&token), json!({"symptoms": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_patients_triage_is_403() {
    let app = test_app();
    let ana = register_and_login(&app, "ana", "").await;
    let bia = register_and_login(&app, "bia", "").await;

    let (_, triage) = send(
        &app,
        json_request("POST", "/triage", Some(&ana), json!({"symptoms": "febre"})),
    )
    .await;

    let uri = format!("/triage/{}/recommendations", triage["id"]);
    let (status, _) = send(&app, get_request(&uri, Some(&bia))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_triage_is_404() {
    let app = test_app();
    let token = register_and_login(&app, "ana", "").await;

    let (status, _) = send(&app, get_request("/triage/999/recommendations", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_triage_id_is_400_json() {
    let app = test_app();
    let token = register_and_login(&app, "ana", "").await;

    let (status, body) = send(&app, get_request("/triage/abc/recommendations", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn login_ignores_surrounding_whitespace_in_username() {
    let app = test_app();
    register_and_login(&app, "ana", "").await;

    let (status, body) = send(&app, login_request("%20ana%20", "pw123")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = test_app();
    let (status, body) = send(&app, get_request("/api-docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/triage/{triage_id}/recommendations"].is_object());
    assert!(body["paths"]["/auth/token"].is_object());
}
