use super::config::SurveyConfig;
use super::validation::{SubmissionRequest, ValidationError, validate_submission};
use crate::database::entities::SurveyResponseRecord;
use crate::database::{DatabaseError, DatabaseManager, NewSubmission, StoredSubmission};
use crate::metrics;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to persist submission: {0}")]
    Persistence(#[source] DatabaseError),
    #[error("Failed to read submission: {0}")]
    Query(#[source] DatabaseError),
    #[error("Submission {0} not found")]
    NotFound(i32),
}

/// A stored submission as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub contact_number: Option<String>,
    /// Age when the survey was submitted
    pub age: i32,
    pub submitted_at: DateTime<Utc>,
    pub favorite_foods: Vec<String>,
    /// Question label to rating
    pub ratings: BTreeMap<String, i32>,
}

impl From<StoredSubmission> for SubmissionView {
    fn from(stored: StoredSubmission) -> Self {
        let response = stored.response;
        Self {
            id: response.id,
            full_name: response.full_name,
            email: response.email,
            date_of_birth: response.date_of_birth,
            contact_number: response.contact_number,
            age: response.age,
            submitted_at: response.submitted_at,
            favorite_foods: stored
                .favorite_foods
                .into_iter()
                .map(|food| food.food_label)
                .collect(),
            ratings: stored
                .hobby_ratings
                .into_iter()
                .map(|rating| (rating.hobby_label, rating.rating_value))
                .collect(),
        }
    }
}

#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Validate and persist a submission as of `today`, returning the new response id
    async fn submit_as_of(
        &self,
        request: &SubmissionRequest,
        today: NaiveDate,
    ) -> Result<i32, SubmissionError>;

    /// Validate and persist a submission using the current UTC date for the age
    async fn submit(&self, request: &SubmissionRequest) -> Result<i32, SubmissionError> {
        self.submit_as_of(request, Utc::now().date_naive()).await
    }

    /// Read a stored submission back with its foods and ratings
    async fn get(&self, response_id: i32) -> Result<SubmissionView, SubmissionError>;
}

pub struct SubmissionServiceImpl {
    database: Arc<dyn DatabaseManager>,
    rules: SurveyConfig,
}

impl SubmissionServiceImpl {
    pub fn new(database: Arc<dyn DatabaseManager>, rules: SurveyConfig) -> Self {
        Self { database, rules }
    }
}

#[async_trait]
impl SubmissionService for SubmissionServiceImpl {
    async fn submit_as_of(
        &self,
        request: &SubmissionRequest,
        today: NaiveDate,
    ) -> Result<i32, SubmissionError> {
        let validated = match validate_submission(request, today, &self.rules) {
            Ok(validated) => validated,
            Err(err) => {
                warn!(rule = err.kind(), "Rejected survey submission: {}", err);
                metrics::track_submission("rejected");
                return Err(err.into());
            }
        };

        let submission = NewSubmission {
            response: SurveyResponseRecord {
                id: 0,
                full_name: validated.full_name,
                email: validated.email,
                date_of_birth: validated.date_of_birth,
                contact_number: validated.contact_number,
                age: validated.age,
                submitted_at: Utc::now(),
            },
            favorite_foods: validated.favorite_foods,
            hobby_ratings: validated
                .ratings
                .into_iter()
                .map(|(question, value)| (question.label().to_string(), value))
                .collect(),
        };

        match self.database.submissions().create(&submission).await {
            Ok(response_id) => {
                info!(
                    response_id,
                    age = submission.response.age,
                    foods = submission.favorite_foods.len(),
                    "Survey submission stored"
                );
                metrics::track_submission("accepted");
                Ok(response_id)
            }
            Err(err) => {
                error!("Failed to store survey submission: {}", err);
                metrics::track_submission("failed");
                Err(SubmissionError::Persistence(err))
            }
        }
    }

    async fn get(&self, response_id: i32) -> Result<SubmissionView, SubmissionError> {
        let stored = self
            .database
            .submissions()
            .find_by_id(response_id)
            .await
            .map_err(SubmissionError::Query)?
            .ok_or(SubmissionError::NotFound(response_id))?;

        Ok(stored.into())
    }
}
