use super::questions::{FoodChoice, HobbyQuestion, normalize_food_label};
use crate::database::{DatabaseError, DatabaseManager, HobbyRatingSums};
use crate::metrics;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Ratings at or above this value count as agreement
pub const HIGH_RATING_THRESHOLD: i32 = 4;

pub const NO_SURVEYS_MESSAGE: &str = "No Surveys Available";

#[derive(Error, Debug)]
pub enum StatisticsError {
    #[error("Failed to compute {statistic}: {source}")]
    Query {
        statistic: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl StatisticsError {
    fn query(statistic: &'static str) -> impl FnOnce(DatabaseError) -> Self {
        move |source| {
            error!(statistic, "Statistics query failed: {}", source);
            metrics::track_statistics_query(statistic, false);
            StatisticsError::Query { statistic, source }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_surveys: u64,
}

/// Age statistics; all zero when there are no responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgeStatistics {
    pub average_age: f64,
    pub min_age: i32,
    pub max_age: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodPercentage {
    pub food: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HobbyAverage {
    pub key: String,
    pub hobby: String,
    pub average: f64,
}

/// Everything the results page shows, in the shape it reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub total_surveys: u64,
    pub avg_age: f64,
    pub min_age: i32,
    pub max_age: i32,
    pub pizza_percentage: f64,
    pub pasta_percentage: f64,
    pub pap_and_wors_percentage: f64,
    pub movies_average: f64,
    pub music_average: f64,
    pub radio_average: f64,
    pub eat_out_average: f64,
    pub tv_average: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / total * 100` to one decimal; 0 when `total` is 0
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(part as f64 / total as f64 * 100.0)
}

/// `sum / total` to one decimal; 0 when `total` is 0
pub fn ratio(sum: i64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(sum as f64 / total as f64)
}

/// Independent read-only statistics over the stored responses.
///
/// No method shares state with another. Each ratio reads its numerator and
/// denominator in one statement, so it never mixes two snapshots.
#[async_trait]
pub trait AggregationService: Send + Sync {
    async fn total_count(&self) -> Result<TotalCount, StatisticsError>;

    async fn age_statistics(&self) -> Result<AgeStatistics, StatisticsError>;

    /// Share of responses listing `food` as a favorite
    async fn food_percentage(&self, food: &str) -> Result<FoodPercentage, StatisticsError>;

    /// Percentages for every choice shown on the results page
    async fn food_percentages(&self) -> Result<Vec<FoodPercentage>, StatisticsError>;

    /// Sum of 4 and 5 ratings per hobby divided by the number of responses
    async fn hobby_averages(&self) -> Result<Vec<HobbyAverage>, StatisticsError>;

    async fn summary(&self) -> Result<ResultsSummary, StatisticsError>;
}

pub struct AggregationServiceImpl {
    database: Arc<dyn DatabaseManager>,
}

impl AggregationServiceImpl {
    pub fn new(database: Arc<dyn DatabaseManager>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl AggregationService for AggregationServiceImpl {
    async fn total_count(&self) -> Result<TotalCount, StatisticsError> {
        let total_surveys = self
            .database
            .statistics()
            .count_responses()
            .await
            .map_err(StatisticsError::query("total count"))?;

        metrics::track_statistics_query("total count", true);
        Ok(TotalCount { total_surveys })
    }

    async fn age_statistics(&self) -> Result<AgeStatistics, StatisticsError> {
        let aggregate = self
            .database
            .statistics()
            .age_aggregate()
            .await
            .map_err(StatisticsError::query("age statistics"))?;

        let count = u64::try_from(aggregate.response_count).unwrap_or(0);

        metrics::track_statistics_query("age statistics", true);
        Ok(AgeStatistics {
            average_age: ratio(aggregate.age_sum.unwrap_or(0), count),
            min_age: aggregate.min_age.unwrap_or(0),
            max_age: aggregate.max_age.unwrap_or(0),
        })
    }

    async fn food_percentage(&self, food: &str) -> Result<FoodPercentage, StatisticsError> {
        let label = normalize_food_label(food);

        let share = self
            .database
            .statistics()
            .food_share(&label)
            .await
            .map_err(StatisticsError::query("food percentage"))?;

        metrics::track_statistics_query("food percentage", true);
        Ok(FoodPercentage {
            percentage: percentage(
                u64::try_from(share.matching_count).unwrap_or(0),
                u64::try_from(share.response_count).unwrap_or(0),
            ),
            food: label,
        })
    }

    async fn food_percentages(&self) -> Result<Vec<FoodPercentage>, StatisticsError> {
        let mut percentages = Vec::with_capacity(FoodChoice::REPORTED.len());
        for choice in FoodChoice::REPORTED {
            percentages.push(self.food_percentage(choice.label()).await?);
        }
        Ok(percentages)
    }

    async fn hobby_averages(&self) -> Result<Vec<HobbyAverage>, StatisticsError> {
        let HobbyRatingSums {
            response_count,
            sums,
        } = self
            .database
            .statistics()
            .hobby_rating_sums(HIGH_RATING_THRESHOLD)
            .await
            .map_err(StatisticsError::query("hobby averages"))?;

        let total = u64::try_from(response_count).unwrap_or(0);
        let sums: HashMap<String, i64> = sums.into_iter().collect();

        metrics::track_statistics_query("hobby averages", true);
        Ok(HobbyQuestion::ALL
            .iter()
            .map(|question| HobbyAverage {
                key: question.key().to_string(),
                hobby: question.label().to_string(),
                average: ratio(sums.get(question.label()).copied().unwrap_or(0), total),
            })
            .collect())
    }

    async fn summary(&self) -> Result<ResultsSummary, StatisticsError> {
        let TotalCount { total_surveys } = self.total_count().await?;
        let ages = self.age_statistics().await?;
        let foods = self.food_percentages().await?;
        let hobbies = self.hobby_averages().await?;

        let food = |choice: FoodChoice| {
            foods
                .iter()
                .find(|entry| entry.food == choice.label())
                .map(|entry| entry.percentage)
                .unwrap_or(0.0)
        };
        let hobby = |question: HobbyQuestion| {
            hobbies
                .iter()
                .find(|entry| entry.key == question.key())
                .map(|entry| entry.average)
                .unwrap_or(0.0)
        };

        Ok(ResultsSummary {
            total_surveys,
            avg_age: ages.average_age,
            min_age: ages.min_age,
            max_age: ages.max_age,
            pizza_percentage: food(FoodChoice::Pizza),
            pasta_percentage: food(FoodChoice::Pasta),
            pap_and_wors_percentage: food(FoodChoice::PapAndWors),
            movies_average: hobby(HobbyQuestion::Movies),
            music_average: hobby(HobbyQuestion::Music),
            radio_average: hobby(HobbyQuestion::Radio),
            eat_out_average: hobby(HobbyQuestion::EatOut),
            tv_average: hobby(HobbyQuestion::Tv),
            message: (total_surveys == 0).then(|| NO_SURVEYS_MESSAGE.to_string()),
        })
    }
}
