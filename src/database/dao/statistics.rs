use crate::database::entities::{favorite_foods, hobby_ratings, survey_responses};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::sea_query::{Alias, Expr, Func, Query, SelectStatement, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QuerySelect,
};

/// Raw age aggregates over all responses
#[derive(Debug, Clone, Default, PartialEq, FromQueryResult)]
pub struct AgeAggregate {
    pub response_count: i64,
    pub age_sum: Option<i64>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

/// Denominator and numerator of a food percentage
#[derive(Debug, Clone, Default, PartialEq, FromQueryResult)]
pub struct FoodShare {
    pub response_count: i64,
    pub matching_count: i64,
}

/// Qualifying rating sums per hobby label and the response count they divide by
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HobbyRatingSums {
    pub response_count: i64,
    pub sums: Vec<(String, i64)>,
}

/// Read-only aggregate queries. Each method is a single statement.
#[derive(Clone)]
pub struct StatisticsDao {
    db: DatabaseConnection,
}

impl StatisticsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Number of survey responses
    pub async fn count_responses(&self) -> DatabaseResult<u64> {
        survey_responses::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Count, sum, min and max of the stored ages
    pub async fn age_aggregate(&self) -> DatabaseResult<AgeAggregate> {
        let aggregate = survey_responses::Entity::find()
            .select_only()
            .column_as(survey_responses::Column::Id.count(), "response_count")
            .column_as(survey_responses::Column::Age.sum(), "age_sum")
            .column_as(survey_responses::Column::Age.min(), "min_age")
            .column_as(survey_responses::Column::Age.max(), "max_age")
            .into_model::<AgeAggregate>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(aggregate.unwrap_or_default())
    }

    /// Response count and the number of distinct responses listing
    /// `food_label`, read together in one statement
    pub async fn food_share(&self, food_label: &str) -> DatabaseResult<FoodShare> {
        let query = food_share_query(food_label);

        let statement = self.db.get_database_backend().build(&query);
        let share = FoodShare::find_by_statement(statement)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(share.unwrap_or_default())
    }

    /// Sum of ratings at or above `min_rating` per hobby label, with the
    /// response count from the same statement.
    /// Labels without a qualifying rating are absent from `sums`.
    pub async fn hobby_rating_sums(&self, min_rating: i32) -> DatabaseResult<HobbyRatingSums> {
        #[derive(FromQueryResult)]
        struct HobbySum {
            hobby_label: String,
            qualifying_sum: Option<i64>,
            response_count: i64,
        }

        let rows: Vec<HobbySum> = hobby_ratings::Entity::find()
            .select_only()
            .column(hobby_ratings::Column::HobbyLabel)
            .column_as(hobby_ratings::Column::RatingValue.sum(), "qualifying_sum")
            .expr_as(response_count_subquery(), "response_count")
            .filter(hobby_ratings::Column::RatingValue.gte(min_rating))
            .group_by(hobby_ratings::Column::HobbyLabel)
            .into_model()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        // No qualifying rows means every sum is zero, whatever the count
        let response_count = rows.first().map(|row| row.response_count).unwrap_or(0);

        Ok(HobbyRatingSums {
            response_count,
            sums: rows
                .into_iter()
                .map(|row| (row.hobby_label, row.qualifying_sum.unwrap_or(0)))
                .collect(),
        })
    }
}

/// `SELECT (response count), (distinct responses listing the label)`
fn food_share_query(food_label: &str) -> SelectStatement {
    let matching = Query::select()
        .expr(Func::count_distinct(Expr::col((
            favorite_foods::Entity,
            favorite_foods::Column::ResponseId,
        ))))
        .from(favorite_foods::Entity)
        .and_where(
            Expr::col((favorite_foods::Entity, favorite_foods::Column::FoodLabel)).eq(food_label),
        )
        .to_owned();

    Query::select()
        .expr_as(response_count_subquery(), Alias::new("response_count"))
        .expr_as(
            SimpleExpr::SubQuery(None, Box::new(matching.into_sub_query_statement())),
            Alias::new("matching_count"),
        )
        .to_owned()
}

/// `(SELECT COUNT(id) FROM survey_responses)`
fn response_count_subquery() -> SimpleExpr {
    let count = Query::select()
        .expr(Func::count(Expr::col((
            survey_responses::Entity,
            survey_responses::Column::Id,
        ))))
        .from(survey_responses::Entity)
        .to_owned();

    SimpleExpr::SubQuery(None, Box::new(count.into_sub_query_statement()))
}
