mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{TestHarness, ratings, submission};
use sea_orm::ConnectionTrait;
use survey_service::survey::SubmissionRequest;

/// Submit with a fixed "today" so ages are exact
async fn submit_as_of(harness: &TestHarness, body: serde_json::Value, today: NaiveDate) -> i32 {
    let request: SubmissionRequest = serde_json::from_value(body).unwrap();
    harness
        .server
        .submission_service
        .submit_as_of(&request, today)
        .await
        .unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_empty_store_reports_zeros() {
    let harness = TestHarness::new().await;

    let (status, count) = harness.get("/statistics/count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count["totalSurveys"], 0);

    let (_, ages) = harness.get("/statistics/age").await;
    assert_eq!(ages["averageAge"], 0.0);
    assert_eq!(ages["minAge"], 0);
    assert_eq!(ages["maxAge"], 0);

    let (_, pizza) = harness.get("/statistics/foods/Pizza").await;
    assert_eq!(pizza["percentage"], 0.0);

    let (_, hobbies) = harness.get("/statistics/hobbies").await;
    for hobby in hobbies.as_array().unwrap() {
        assert_eq!(hobby["average"], 0.0);
    }

    let (_, summary) = harness.get("/survey-results").await;
    assert_eq!(summary["totalSurveys"], 0);
    assert_eq!(summary["avgAge"], 0.0);
    assert_eq!(summary["message"], "No Surveys Available");
}

#[tokio::test]
async fn test_age_statistics() {
    let harness = TestHarness::new().await;
    let today = day(2024, 6, 15);

    // Turns 24 tomorrow, so still 23
    submit_as_of(
        &harness,
        submission("A One", "2000-06-16", &[], ratings(1, 1, 1, 1, 1)),
        today,
    )
    .await;
    // Turned 24 yesterday
    submit_as_of(
        &harness,
        submission("B Two", "2000-06-14", &[], ratings(1, 1, 1, 1, 1)),
        today,
    )
    .await;
    submit_as_of(
        &harness,
        submission("C Three", "1964-01-01", &[], ratings(1, 1, 1, 1, 1)),
        today,
    )
    .await;

    let (_, ages) = harness.get("/statistics/age").await;
    assert_eq!(ages["minAge"], 23);
    assert_eq!(ages["maxAge"], 60);
    // (23 + 24 + 60) / 3 = 35.67
    assert_eq!(ages["averageAge"], 35.7);
}

#[tokio::test]
async fn test_hobby_average_counts_only_agreement() {
    let harness = TestHarness::new().await;

    for movies in [5, 4, 3, 5] {
        let (status, _) = harness
            .submit(submission(
                &format!("Movie Fan {}", movies),
                "1990-01-01",
                &["Pizza"],
                ratings(movies, 1, 2, 3, 4),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, hobbies) = harness.get("/statistics/hobbies").await;
    let average = |key: &str| {
        hobbies
            .as_array()
            .unwrap()
            .iter()
            .find(|h| h["key"] == key)
            .unwrap()["average"]
            .as_f64()
            .unwrap()
    };

    // (5 + 4 + 5) / 4
    assert_eq!(average("movies"), 3.5);
    assert_eq!(average("music"), 0.0);
    assert_eq!(average("radio"), 0.0);
    assert_eq!(average("eat_out"), 0.0);
    assert_eq!(average("tv"), 4.0);

    let (_, summary) = harness.get("/survey-results").await;
    assert_eq!(summary["moviesAverage"], 3.5);
    assert_eq!(summary["tvAverage"], 4.0);
    assert!(summary.get("message").is_none());
}

#[tokio::test]
async fn test_food_percentages() {
    let harness = TestHarness::new().await;

    for foods in [
        vec!["Pizza", "Pasta"],
        vec!["Pizza"],
        vec!["pap and wors"],
        vec![],
    ] {
        let (status, _) = harness
            .submit(submission("Food Lover", "1995-09-09", &foods, ratings(2, 2, 2, 2, 2)))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, pizza) = harness.get("/statistics/foods/Pizza").await;
    assert_eq!(pizza["food"], "Pizza");
    assert_eq!(pizza["percentage"], 50.0);

    let (_, pap) = harness.get("/statistics/foods/Pap%20and%20Wors").await;
    assert_eq!(pap["food"], "Pap and Wors");
    assert_eq!(pap["percentage"], 25.0);

    let (_, foods) = harness.get("/statistics/foods").await;
    let foods = foods.as_array().unwrap();
    assert_eq!(foods.len(), 3);
    assert_eq!(foods[1]["food"], "Pasta");
    assert_eq!(foods[1]["percentage"], 25.0);

    let (_, summary) = harness.get("/survey-results").await;
    assert_eq!(summary["totalSurveys"], 4);
    assert_eq!(summary["pizzaPercentage"], 50.0);
    assert_eq!(summary["papAndWorsPercentage"], 25.0);
}

#[tokio::test]
async fn test_duplicate_food_counts_once() {
    let harness = TestHarness::new().await;

    harness
        .submit(submission("Twice Pizza", "1991-04-04", &["Pizza", "pizza"], ratings(1, 1, 1, 1, 1)))
        .await;
    harness
        .submit(submission("No Pizza", "1991-04-04", &["Pasta"], ratings(1, 1, 1, 1, 1)))
        .await;

    let (_, pizza) = harness.get("/statistics/foods/Pizza").await;
    assert_eq!(pizza["percentage"], 50.0);
}

#[tokio::test]
async fn test_query_failure_is_server_error() {
    let harness = TestHarness::new().await;
    harness
        .server
        .database
        .connection()
        .execute_unprepared("DROP TABLE hobby_ratings")
        .await
        .unwrap();

    let (status, error) = harness.get("/statistics/hobbies").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["error"], "QueryError");

    // Unrelated statistics still answer
    let (status, _) = harness.get("/statistics/count").await;
    assert_eq!(status, StatusCode::OK);
}
