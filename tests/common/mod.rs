#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use serde_json::{Value, json};
use survey_service::{Server, test_utils::TestServerBuilder};
use tower::ServiceExt;

/// Full application over an in-memory database
pub struct TestHarness {
    pub server: Server,
    pub app: Router,
}

impl TestHarness {
    pub async fn new() -> Self {
        let server = TestServerBuilder::new().build().await;
        let app = server.create_app();
        Self { server, app }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn submit(&self, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, "/submissions", Some(body)).await
    }
}

/// Ratings keyed by question label
pub fn ratings(movies: i64, music: i64, radio: i64, eat_out: i64, tv: i64) -> Value {
    json!({
        "I like to watch movies": movies,
        "I like to listen to music": music,
        "I like to listen to radio": radio,
        "I like to eat out": eat_out,
        "I like to watch TV": tv
    })
}

pub fn submission(name: &str, date_of_birth: &str, foods: &[&str], ratings: Value) -> Value {
    json!({
        "fullName": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "dateOfBirth": date_of_birth,
        "contactNumber": "0825551234",
        "favoriteFoods": foods,
        "ratings": ratings
    })
}
