//! # Medtriage API
//!
//! REST API over [`medtriage_core`].
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Bearer-token authentication
//! - OpenAPI document generation
//! - REST-specific concerns (JSON and form bodies, CORS, request tracing)

#![warn(rust_2018_idioms)]

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::register,
        handlers::login,
        handlers::me,
        handlers::create_medication,
        handlers::list_medications,
        handlers::create_triage,
        handlers::recommendations,
    ),
    components(schemas(
        dto::HealthRes,
        dto::RegisterRequest,
        dto::LoginForm,
        dto::TokenOut,
        dto::PatientOut,
        dto::MedicationIn,
        dto::MedicationOut,
        dto::TriageIn,
        dto::TriageOut,
        dto::RecommendationOut,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::register))
        .route("/auth/token", post(handlers::login))
        .route("/patients/me", get(handlers::me))
        .route(
            "/medications",
            get(handlers::list_medications).post(handlers::create_medication),
        )
        .route("/triage", post(handlers::create_triage))
        .route(
            "/triage/:triage_id/recommendations",
            get(handlers::recommendations),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
