use crate::{error::AppError, server::Server};
use axum::{Router, http::header, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Survey Service API",
        version = "1.0.0",
        description = "Collects lifestyle survey responses and reports aggregate statistics"
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::submissions::create_submission,
        crate::routes::submissions::get_submission,
        crate::routes::statistics::get_total_count,
        crate::routes::statistics::get_age_statistics,
        crate::routes::statistics::get_food_percentages,
        crate::routes::statistics::get_food_percentage,
        crate::routes::statistics::get_hobby_averages,
        crate::routes::statistics::get_survey_results,
    ),
    components(
        schemas(
            crate::error::ApiErrorResponse,
            crate::health::HealthResponse,
            crate::health::HealthStatus,
            crate::health::HealthCheckResult,
            crate::health::HealthSummary,
            crate::survey::SubmissionRequest,
            crate::survey::SubmissionView,
            crate::routes::submissions::SubmissionCreated,
            crate::survey::TotalCount,
            crate::survey::AgeStatistics,
            crate::survey::FoodPercentage,
            crate::survey::HobbyAverage,
            crate::survey::ResultsSummary,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Submissions", description = "Survey submission endpoints"),
        (name = "Statistics", description = "Aggregate survey statistics"),
    )
)]
pub struct ApiDoc;

/// Create documentation routes
pub fn create_docs_routes() -> Router<Server> {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", ApiDoc::openapi()))
        .route("/docs/openapi.yaml", get(openapi_yaml))
}

/// Serve OpenAPI document as YAML
async fn openapi_yaml() -> Result<([(header::HeaderName, &'static str); 1], String), AppError> {
    let yaml = serde_yaml_ng::to_string(&ApiDoc::openapi()).map_err(|e| {
        AppError::Internal(format!("Failed to serialize OpenAPI document to YAML: {e}"))
    })?;

    Ok(([(header::CONTENT_TYPE, "application/yaml")], yaml))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[test]
    fn test_document_lists_survey_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/submissions",
            "/submissions/{id}",
            "/statistics/count",
            "/statistics/foods/{label}",
            "/survey-results",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[tokio::test]
    async fn test_openapi_json() {
        let server = crate::test_utils::TestServerBuilder::new().build().await;
        let app = create_docs_routes().with_state(server);

        let request = Request::builder()
            .uri("/docs/openapi.json")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("application/json"));
    }

    #[tokio::test]
    async fn test_openapi_yaml() {
        let server = crate::test_utils::TestServerBuilder::new().build().await;
        let app = create_docs_routes().with_state(server);

        let request = Request::builder()
            .uri("/docs/openapi.yaml")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("application/yaml"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let yaml = String::from_utf8(body.to_vec()).unwrap();
        assert!(yaml.contains("Survey Service API"));
    }
}
