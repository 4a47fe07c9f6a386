//! Route handlers.

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Form, Json,
};
use medtriage_core::NewMedication;

use crate::auth::AuthUser;
use crate::dto::{
    HealthRes, LoginForm, MedicationIn, MedicationOut, PatientOut, RecommendationOut,
    RegisterRequest, TokenOut, TriageIn, TriageOut,
};
use crate::error::ApiError;
use crate::state::AppState;

fn bad_body(rejection: impl std::fmt::Display) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, rejection.to_string())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "medtriage API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Patient registered", body = PatientOut),
        (status = 400, description = "User exists or malformed body")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<PatientOut>, ApiError> {
    let Json(req) = payload.map_err(bad_body)?;
    let patient = state
        .run(move |svc| svc.register_patient(req.into()))
        .await?;
    Ok(Json(patient.into()))
}

#[utoipa::path(
    post,
    path = "/auth/token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenOut),
        (status = 401, description = "Incorrect username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenOut>, ApiError> {
    let Form(form) = form.map_err(bad_body)?;
    let session = state
        .run(move |svc| svc.authenticate(&form.username, &form.password))
        .await?;
    Ok(Json(TokenOut::bearer(session.access_token)))
}

#[utoipa::path(
    get,
    path = "/patients/me",
    responses(
        (status = 200, description = "The authenticated patient", body = PatientOut),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(AuthUser(patient): AuthUser) -> Json<PatientOut> {
    Json(patient.into())
}

#[utoipa::path(
    post,
    path = "/medications",
    request_body = MedicationIn,
    responses(
        (status = 200, description = "Medication added", body = MedicationOut),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_medication(
    State(state): State<AppState>,
    AuthUser(patient): AuthUser,
    payload: Result<Json<MedicationIn>, JsonRejection>,
) -> Result<Json<MedicationOut>, ApiError> {
    let Json(med) = payload.map_err(bad_body)?;
    let new_med: NewMedication = med.into();
    tracing::debug!(patient_id = patient.id, name = %new_med.name, "catalog write");
    let medication = state.run(move |svc| svc.add_medication(new_med)).await?;
    Ok(Json(medication.into()))
}

#[utoipa::path(
    get,
    path = "/medications",
    responses(
        (status = 200, description = "The whole catalog, ascending ID", body = [MedicationOut])
    )
)]
pub async fn list_medications(
    State(state): State<AppState>,
) -> Result<Json<Vec<MedicationOut>>, ApiError> {
    let medications = state.run(|svc| svc.list_medications()).await?;
    Ok(Json(medications.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/triage",
    request_body = TriageIn,
    responses(
        (status = 200, description = "Triage recorded", body = TriageOut),
        (status = 400, description = "Empty symptoms or malformed body"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_triage(
    State(state): State<AppState>,
    AuthUser(patient): AuthUser,
    payload: Result<Json<TriageIn>, JsonRejection>,
) -> Result<Json<TriageOut>, ApiError> {
    let Json(body) = payload.map_err(bad_body)?;
    let triage = state
        .run(move |svc| svc.record_triage(&patient.username, &body.symptoms))
        .await?;
    Ok(Json(triage.into()))
}

#[utoipa::path(
    get,
    path = "/triage/{triage_id}/recommendations",
    params(
        ("triage_id" = i64, Path, description = "Triage ID")
    ),
    responses(
        (status = 200, description = "Ranked recommendations", body = [RecommendationOut]),
        (status = 400, description = "Triage ID is not an integer"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Triage belongs to another patient"),
        (status = 404, description = "Triage not found")
    )
)]
pub async fn recommendations(
    State(state): State<AppState>,
    AuthUser(patient): AuthUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<RecommendationOut>>, ApiError> {
    let Path(triage_id) = path.map_err(bad_body)?;
    let recs = state
        .run(move |svc| svc.recommendations_for(triage_id, &patient.username))
        .await?;
    Ok(Json(recs.into_iter().map(Into::into).collect()))
}
