use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;

use super::domain::{AddressUpdate, RegistrationId, RegistrationSubmission};
use super::guard::RegistrationViolation;
use super::repository::{NoticePublisher, RegistrationRepository, RepositoryError};
use super::service::{RegistrationService, RegistrationServiceError};
use super::summary::RegistrationSummary;

/// Router builder exposing HTTP endpoints for registration intake and lookup.
pub fn registration_router<R, N>(service: Arc<RegistrationService<R, N>>) -> Router
where
    R: RegistrationRepository + 'static,
    N: NoticePublisher + 'static,
{
    Router::new()
        .route("/api/v1/agency/registrations", post(submit_handler::<R, N>))
        .route(
            "/api/v1/agency/registrations/:registration_id",
            get(status_handler::<R, N>),
        )
        .route(
            "/api/v1/agency/registrations/:registration_id/address",
            put(update_address_handler::<R, N>),
        )
        .route(
            "/api/v1/agency/registrations/:registration_id/summary",
            get(summary_handler::<R, N>),
        )
        .with_state(service)
}

fn rejection_payload(violation: &RegistrationViolation) -> serde_json::Value {
    match violation {
        RegistrationViolation::InvalidFields(violations) => json!({
            "error": violation.to_string(),
            "violations": violations.to_views(),
        }),
        other => json!({
            "error": other.to_string(),
        }),
    }
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<RegistrationService<R, N>>>,
    axum::Json(submission): axum::Json<RegistrationSubmission>,
) -> Response
where
    R: RegistrationRepository + 'static,
    N: NoticePublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(RegistrationServiceError::Rejected(violation)) => {
            let payload = rejection_payload(&violation);
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(RegistrationServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "registration already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<RegistrationService<R, N>>>,
    Path(registration_id): Path<String>,
) -> Response
where
    R: RegistrationRepository + 'static,
    N: NoticePublisher + 'static,
{
    let id = RegistrationId(registration_id);
    match service.status_view(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(RegistrationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "registration not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn update_address_handler<R, N>(
    State(service): State<Arc<RegistrationService<R, N>>>,
    Path(registration_id): Path<String>,
    axum::Json(update): axum::Json<AddressUpdate>,
) -> Response
where
    R: RegistrationRepository + 'static,
    N: NoticePublisher + 'static,
{
    let id = RegistrationId(registration_id);
    match service.update_address(&id, update) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(RegistrationServiceError::Rejected(violation)) => {
            let payload = rejection_payload(&violation);
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(error @ RegistrationServiceError::ProfileLocked { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(RegistrationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "registration not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn summary_handler<R, N>(
    State(service): State<Arc<RegistrationService<R, N>>>,
    Path(registration_id): Path<String>,
) -> Response
where
    R: RegistrationRepository + 'static,
    N: NoticePublisher + 'static,
{
    let id = RegistrationId(registration_id);
    match service.registration(&id) {
        Ok(record) => {
            let summary = RegistrationSummary::from_record(&record);
            (StatusCode::OK, axum::Json(summary)).into_response()
        }
        Err(RegistrationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "registration not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
