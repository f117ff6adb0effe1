use crate::{
    error::{AppError, ApiErrorResponse},
    server::Server,
    survey::{SubmissionRequest, SubmissionView, ValidationError},
};
use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

/// Response for a stored submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionCreated {
    pub id: i32,
    pub message: String,
}

/// Create survey submission routes
pub fn create_submission_routes() -> Router<Server> {
    Router::new()
        .route("/", post(create_submission))
        .route("/{id}", get(get_submission))
}

/// Submit one survey response
#[utoipa::path(
    post,
    path = "/submissions",
    request_body = SubmissionRequest,
    responses(
        (status = 201, description = "Survey stored", body = SubmissionCreated),
        (status = 400, description = "Validation failed", body = ApiErrorResponse),
        (status = 500, description = "Survey could not be stored", body = ApiErrorResponse)
    ),
    tag = "Submissions"
)]
pub async fn create_submission(
    State(server): State<Server>,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionCreated>), AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected unreadable submission body: {}", rejection.body_text());
        ValidationError::MalformedBody(rejection.body_text())
    })?;

    let id = server.submission_service.submit(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionCreated {
            id,
            message: "Survey submitted successfully".to_string(),
        }),
    ))
}

/// Read a stored survey response back
#[utoipa::path(
    get,
    path = "/submissions/{id}",
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Stored survey response", body = SubmissionView),
        (status = 404, description = "No such submission", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Submissions"
)]
pub async fn get_submission(
    State(server): State<Server>,
    Path(id): Path<i32>,
) -> Result<Json<SubmissionView>, AppError> {
    Ok(Json(server.submission_service.get(id).await?))
}
