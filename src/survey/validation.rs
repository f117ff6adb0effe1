use super::age::{age_on, parse_date_of_birth};
use super::config::SurveyConfig;
use super::questions::{HobbyQuestion, normalize_food_label};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;
use utoipa::ToSchema;

/// One survey response as posted by the form.
///
/// Every field is optional on the wire so that a missing field is reported
/// as a validation failure naming it rather than a JSON decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub favorite_foods: Vec<String>,
    /// Question label (or short key) to a rating from 1 to 5
    #[serde(default)]
    pub ratings: HashMap<String, i64>,
}

/// Client-caused rejection of a submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("dateOfBirth is not a valid calendar date: {0}")]
    InvalidDate(String),
    #[error("Age {age} is outside the accepted range {min}-{max}")]
    AgeOutOfRange { age: i32, min: i32, max: i32 },
    #[error("Missing ratings for: {}", .0.join(", "))]
    IncompleteRatings(Vec<String>),
    #[error("Unknown rating question: {0}")]
    UnknownQuestion(String),
    #[error("Question '{0}' was rated more than once")]
    DuplicateRating(String),
    #[error("Rating for '{question}' must be between 1 and 5, got {value}")]
    RatingOutOfRange { question: String, value: i64 },
    #[error("Favorite food entries must not be blank")]
    InvalidFood,
    #[error("Request body is not a valid submission: {0}")]
    MalformedBody(String),
}

impl ValidationError {
    /// Stable rule name carried in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "MissingField",
            ValidationError::InvalidDate(_) => "InvalidDate",
            ValidationError::AgeOutOfRange { .. } => "AgeOutOfRange",
            ValidationError::IncompleteRatings(_) => "IncompleteRatings",
            ValidationError::UnknownQuestion(_) => "UnknownQuestion",
            ValidationError::DuplicateRating(_) => "DuplicateRating",
            ValidationError::RatingOutOfRange { .. } => "RatingOutOfRange",
            ValidationError::InvalidFood => "InvalidFood",
            ValidationError::MalformedBody(_) => "MalformedBody",
        }
    }
}

/// A submission that passed validation, with its derived age
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub contact_number: Option<String>,
    pub age: i32,
    pub favorite_foods: Vec<String>,
    pub ratings: BTreeMap<HobbyQuestion, i32>,
}

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

fn required(value: &Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Validate a submission against the survey rules as of `today`.
pub fn validate_submission(
    request: &SubmissionRequest,
    today: NaiveDate,
    rules: &SurveyConfig,
) -> Result<ValidatedSubmission, ValidationError> {
    let full_name = required(&request.full_name, "fullName")?;
    let email = required(&request.email, "email")?;
    let raw_date_of_birth = required(&request.date_of_birth, "dateOfBirth")?;

    let date_of_birth = parse_date_of_birth(&raw_date_of_birth)
        .ok_or_else(|| ValidationError::InvalidDate(raw_date_of_birth.clone()))?;

    let age = age_on(date_of_birth, today);
    if age < rules.min_age || age > rules.max_age {
        return Err(ValidationError::AgeOutOfRange {
            age,
            min: rules.min_age,
            max: rules.max_age,
        });
    }

    let mut ratings = BTreeMap::new();
    let mut duplicates = BTreeSet::new();
    let mut unknown = Vec::new();
    for (key, value) in &request.ratings {
        match HobbyQuestion::parse(key) {
            Some(question) => {
                // A label and its short key (or two casings) name the same question
                if ratings.insert(question, *value).is_some() {
                    duplicates.insert(question);
                }
            }
            None => unknown.push(key.clone()),
        }
    }

    if let Some(question) = duplicates.into_iter().next() {
        return Err(ValidationError::DuplicateRating(
            question.label().to_string(),
        ));
    }

    let missing: Vec<String> = HobbyQuestion::ALL
        .iter()
        .filter(|question| !ratings.contains_key(question))
        .map(|question| question.label().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::IncompleteRatings(missing));
    }

    if let Some(key) = unknown.into_iter().min() {
        return Err(ValidationError::UnknownQuestion(key));
    }

    let mut checked_ratings = BTreeMap::new();
    for (question, value) in ratings {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(ValidationError::RatingOutOfRange {
                question: question.label().to_string(),
                value,
            });
        }
        checked_ratings.insert(question, value as i32);
    }

    let mut favorite_foods: Vec<String> = Vec::with_capacity(request.favorite_foods.len());
    for food in &request.favorite_foods {
        let label = normalize_food_label(food);
        if label.is_empty() {
            return Err(ValidationError::InvalidFood);
        }
        if !favorite_foods.contains(&label) {
            favorite_foods.push(label);
        }
    }

    let contact_number = request
        .contact_number
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Ok(ValidatedSubmission {
        full_name,
        email,
        date_of_birth,
        contact_number,
        age,
        favorite_foods,
        ratings: checked_ratings,
    })
}
