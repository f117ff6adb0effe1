use crate::{
    error::{AppError, ApiErrorResponse},
    server::Server,
    survey::{AgeStatistics, FoodPercentage, HobbyAverage, ResultsSummary, TotalCount},
};
use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};

/// Create aggregate statistics routes
pub fn create_statistics_routes() -> Router<Server> {
    Router::new()
        .route("/statistics/count", get(get_total_count))
        .route("/statistics/age", get(get_age_statistics))
        .route("/statistics/foods", get(get_food_percentages))
        .route("/statistics/foods/{label}", get(get_food_percentage))
        .route("/statistics/hobbies", get(get_hobby_averages))
        .route("/survey-results", get(get_survey_results))
}

/// Number of stored survey responses
#[utoipa::path(
    get,
    path = "/statistics/count",
    responses(
        (status = 200, description = "Total responses", body = TotalCount),
        (status = 500, description = "Query failed", body = ApiErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_total_count(State(server): State<Server>) -> Result<Json<TotalCount>, AppError> {
    Ok(Json(server.aggregation_service.total_count().await?))
}

/// Average, youngest and oldest respondent age
#[utoipa::path(
    get,
    path = "/statistics/age",
    responses(
        (status = 200, description = "Age statistics", body = AgeStatistics),
        (status = 500, description = "Query failed", body = ApiErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_age_statistics(
    State(server): State<Server>,
) -> Result<Json<AgeStatistics>, AppError> {
    Ok(Json(server.aggregation_service.age_statistics().await?))
}

/// Percentages for Pizza, Pasta and Pap and Wors
#[utoipa::path(
    get,
    path = "/statistics/foods",
    responses(
        (status = 200, description = "Food percentages", body = Vec<FoodPercentage>),
        (status = 500, description = "Query failed", body = ApiErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_food_percentages(
    State(server): State<Server>,
) -> Result<Json<Vec<FoodPercentage>>, AppError> {
    Ok(Json(server.aggregation_service.food_percentages().await?))
}

/// Percentage of responses listing one food
#[utoipa::path(
    get,
    path = "/statistics/foods/{label}",
    params(
        ("label" = String, Path, description = "Food label, e.g. Pizza")
    ),
    responses(
        (status = 200, description = "Food percentage", body = FoodPercentage),
        (status = 500, description = "Query failed", body = ApiErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_food_percentage(
    State(server): State<Server>,
    Path(label): Path<String>,
) -> Result<Json<FoodPercentage>, AppError> {
    Ok(Json(server.aggregation_service.food_percentage(&label).await?))
}

/// Per-hobby average of agreeing ratings
#[utoipa::path(
    get,
    path = "/statistics/hobbies",
    responses(
        (status = 200, description = "Hobby averages", body = Vec<HobbyAverage>),
        (status = 500, description = "Query failed", body = ApiErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_hobby_averages(
    State(server): State<Server>,
) -> Result<Json<Vec<HobbyAverage>>, AppError> {
    Ok(Json(server.aggregation_service.hobby_averages().await?))
}

/// Everything the results page displays in one call
#[utoipa::path(
    get,
    path = "/survey-results",
    responses(
        (status = 200, description = "Results summary", body = ResultsSummary),
        (status = 500, description = "Query failed", body = ApiErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_survey_results(
    State(server): State<Server>,
) -> Result<Json<ResultsSummary>, AppError> {
    Ok(Json(server.aggregation_service.summary().await?))
}
