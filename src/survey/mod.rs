//! Survey domain: the question set, submission validation and persistence,
//! and the aggregate statistics shown on the results page.

pub mod age;
pub mod aggregation;
pub mod config;
pub mod questions;
pub mod submission;
pub mod validation;

pub use aggregation::{
    AgeStatistics, AggregationService, AggregationServiceImpl, FoodPercentage, HobbyAverage,
    ResultsSummary, StatisticsError, TotalCount,
};
pub use questions::{FoodChoice, HobbyQuestion};
pub use submission::{SubmissionError, SubmissionService, SubmissionServiceImpl, SubmissionView};
pub use validation::{SubmissionRequest, ValidatedSubmission, ValidationError};
