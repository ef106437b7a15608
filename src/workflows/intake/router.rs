use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::api::{IntakeRecordApi, PersistenceError};
use super::domain::{FieldValue, Identity, IntakeField, RecordId};
use super::schema::intake_schema;
use super::service::{IntakeService, IntakeServiceError, SessionId};
use super::session::IntakeError;
use super::wizard::{WizardError, WizardStep};

pub const USER_ID_HEADER: &str = "x-intake-user-id";
pub const USER_NAME_HEADER: &str = "x-intake-user-name";

/// Router builder exposing the intake wizard over HTTP.
pub fn intake_router<A>(service: Arc<IntakeService<A>>) -> Router
where
    A: IntakeRecordApi + 'static,
{
    Router::new()
        .route("/api/v1/intake/schema", get(schema_handler))
        .route("/api/v1/intake/sessions", post(open_draft_handler::<A>))
        .route(
            "/api/v1/intake/sessions/:session_id",
            get(view_handler::<A>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/fields",
            patch(update_field_handler::<A>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/next",
            post(next_handler::<A>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/back",
            post(back_handler::<A>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/goto/:step",
            post(go_to_handler::<A>),
        )
        .route(
            "/api/v1/intake/records/:record_id",
            get(record_handler::<A>),
        )
        .route(
            "/api/v1/intake/records/:record_id/sessions",
            post(open_existing_handler::<A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldUpdate {
    field: IntakeField,
    #[serde(default)]
    value: FieldValue,
}

/// Identity forwarded by the session layer in front of this service.
pub(crate) fn identity_from_headers(headers: &HeaderMap) -> Option<Identity> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let user_id = header(USER_ID_HEADER)?;
    let display_name = header(USER_NAME_HEADER).unwrap_or_else(|| user_id.clone());
    Some(Identity {
        user_id,
        display_name,
    })
}

fn parse_step(raw: &str) -> Option<WizardStep> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "capture" => Some(WizardStep::Capture),
        "placement" => Some(WizardStep::Placement),
        "review" => Some(WizardStep::Review),
        other => other.parse::<usize>().ok().and_then(WizardStep::from_index),
    }
}

pub(crate) async fn schema_handler() -> Response {
    (StatusCode::OK, axum::Json(intake_schema())).into_response()
}

pub(crate) async fn open_draft_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    headers: HeaderMap,
) -> Response
where
    A: IntakeRecordApi + 'static,
{
    let identity = identity_from_headers(&headers);
    let view = service.open_draft(identity.as_ref());
    (StatusCode::CREATED, axum::Json(view)).into_response()
}

pub(crate) async fn open_existing_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    Path(record_id): Path<String>,
) -> Response
where
    A: IntakeRecordApi + 'static,
{
    match service.open_existing(RecordId(record_id)) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn view_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    Path(session_id): Path<String>,
) -> Response
where
    A: IntakeRecordApi + 'static,
{
    respond(service.view(&SessionId(session_id)))
}

pub(crate) async fn update_field_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    Path(session_id): Path<String>,
    axum::Json(update): axum::Json<FieldUpdate>,
) -> Response
where
    A: IntakeRecordApi + 'static,
{
    respond(service.update_field(&SessionId(session_id), update.field, update.value))
}

pub(crate) async fn next_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    A: IntakeRecordApi + 'static,
{
    let identity = identity_from_headers(&headers);
    respond(service.next(&SessionId(session_id), identity.as_ref()))
}

pub(crate) async fn back_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    Path(session_id): Path<String>,
) -> Response
where
    A: IntakeRecordApi + 'static,
{
    respond(service.back(&SessionId(session_id)))
}

pub(crate) async fn go_to_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    Path((session_id, step)): Path<(String, String)>,
) -> Response
where
    A: IntakeRecordApi + 'static,
{
    let Some(step) = parse_step(&step) else {
        let payload = json!({ "error": format!("unknown wizard step '{step}'") });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };
    respond(service.go_to(&SessionId(session_id), step))
}

pub(crate) async fn record_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    Path(record_id): Path<String>,
) -> Response
where
    A: IntakeRecordApi + 'static,
{
    match service.record(&RecordId(record_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, IntakeServiceError>) -> Response {
    match result {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: IntakeServiceError) -> Response {
    if err.is_not_found() {
        let payload = json!({ "error": err.to_string() });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    }

    let intake = match err {
        IntakeServiceError::Intake(intake) => intake,
        other => {
            let payload = json!({ "error": other.to_string() });
            return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
        }
    };

    let (status, payload) = match &intake {
        IntakeError::Validation(validation) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "error": intake.to_string(),
                "missing_fields": validation.missing.badges(),
            }),
        ),
        IntakeError::Authentication(_) => (
            StatusCode::UNAUTHORIZED,
            json!({ "error": intake.to_string() }),
        ),
        IntakeError::Submission(PersistenceError::Failed { message }) => (
            StatusCode::BAD_GATEWAY,
            json!({ "error": intake.to_string(), "detail": message }),
        ),
        IntakeError::Submission(_) | IntakeError::Load(_) => (
            StatusCode::BAD_GATEWAY,
            json!({ "error": intake.to_string() }),
        ),
        IntakeError::Wizard(
            WizardError::Busy
            | WizardError::Closed
            | WizardError::JumpUnavailable
            | WizardError::NotOnReview,
        ) => (StatusCode::CONFLICT, json!({ "error": intake.to_string() })),
        IntakeError::ReadOnlyField(field) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": intake.to_string(), "field": field }),
        ),
    };

    (status, axum::Json(payload)).into_response()
}
