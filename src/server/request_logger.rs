use crate::utils::RequestIdExt;
use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Paths whose traffic is logged; docs assets are skipped
fn is_api_route(path: &str) -> bool {
    path.starts_with("/submissions")
        || path.starts_with("/statistics")
        || path.starts_with("/survey-results")
        || path.starts_with("/health")
}

/// Request/response logging middleware
pub async fn request_response_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    if !is_api_route(&path) {
        return next.run(req).await;
    }

    let request_id = req.extensions().request_id().as_str();

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        "API request"
    );

    let start = Instant::now();
    let response = next.run(req).await;
    let duration = start.elapsed();

    info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        latency_ms = %duration.as_millis(),
        request_id = %request_id,
        "API response"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_api_route() {
        assert!(is_api_route("/submissions"));
        assert!(is_api_route("/statistics/foods/Pizza"));
        assert!(is_api_route("/survey-results"));
        assert!(is_api_route("/health"));
        assert!(!is_api_route("/docs/swagger-ui.css"));
    }
}
