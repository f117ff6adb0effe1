pub mod statistics;
pub mod submissions;

pub use statistics::{AgeAggregate, FoodShare, HobbyRatingSums, StatisticsDao};
pub use submissions::{NewSubmission, StoredSubmission, SubmissionsDao};
