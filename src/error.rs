use crate::database::DatabaseError;
use crate::survey::{StatisticsError, SubmissionError, ValidationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Persistence error: {0}")]
    Persistence(DatabaseError),
    #[error("Query error: {0}")]
    Query(String),
    #[error("Database error: {0}")]
    Database(DatabaseError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error category, e.g. `ValidationError` or `PersistenceError`
    pub error: String,
    /// Validation rule that failed, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub message: String,
}

impl AppError {
    /// Category name reported to clients
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Config(_) => "ConfigError",
            AppError::Validation(_) => "ValidationError",
            AppError::Persistence(_) => "PersistenceError",
            AppError::Query(_) => "QueryError",
            AppError::Database(_) => "DatabaseError",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "InternalError",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Persistence(_)
            | AppError::Query(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(err) => AppError::Validation(err),
            SubmissionError::Persistence(err) => AppError::Persistence(err),
            SubmissionError::Query(err) => AppError::Query(err.to_string()),
            SubmissionError::NotFound(id) => AppError::NotFound(format!("Submission {}", id)),
        }
    }
}

impl From<StatisticsError> for AppError {
    fn from(err: StatisticsError) -> Self {
        AppError::Query(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = match &self {
            AppError::Validation(err) => Some(err.kind().to_string()),
            _ => None,
        };

        let body = Json(ApiErrorResponse {
            error: self.category().to_string(),
            kind,
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Validation(ValidationError::MissingField("email"));
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required field: email"
        );

        let err = AppError::Internal("test message".to_string());
        assert_eq!(err.to_string(), "Internal error: test message");
    }

    #[test]
    fn test_app_error_status_codes() {
        let cases = [
            (
                AppError::Validation(ValidationError::InvalidFood),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Persistence(DatabaseError::Database("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Query("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::NotFound("Submission 7".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Config(config::ConfigError::NotFound("test".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_submission_error_mapping() {
        let app_err: AppError = SubmissionError::NotFound(3).into();
        assert!(matches!(app_err, AppError::NotFound(_)));

        let app_err: AppError =
            SubmissionError::Persistence(DatabaseError::Database("x".to_string())).into();
        assert!(matches!(app_err, AppError::Persistence(_)));
        assert_eq!(app_err.category(), "PersistenceError");
    }

    #[test]
    fn test_read_back_failure_is_query_error() {
        let app_err: AppError =
            SubmissionError::Query(DatabaseError::Database("no such table".to_string())).into();
        assert_eq!(app_err.category(), "QueryError");
        assert_eq!(app_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(app_err.to_string().contains("no such table"));
    }

    #[tokio::test]
    async fn test_validation_error_body_names_kind() {
        let err = AppError::Validation(ValidationError::IncompleteRatings(vec![
            "I like to watch TV".to_string(),
        ]));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "ValidationError");
        assert_eq!(json["kind"], "IncompleteRatings");
        assert!(json["message"].as_str().unwrap().contains("I like to watch TV"));
    }

    #[tokio::test]
    async fn test_server_error_body_has_no_kind() {
        let response = AppError::Query("Failed to compute total count".to_string()).into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "QueryError");
        assert!(json.get("kind").is_none());
    }
}
