use crate::database::entities::{
    FavoriteFoodRecord, HobbyRatingRecord, SurveyResponseRecord, favorite_foods, hobby_ratings,
    survey_responses,
};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, error};

/// A response and its child rows, ready to be written as one unit
#[derive(Debug, Clone)]
pub struct NewSubmission {
    /// `id` is ignored; the database assigns it
    pub response: SurveyResponseRecord,
    pub favorite_foods: Vec<String>,
    /// (hobby label, rating value)
    pub hobby_ratings: Vec<(String, i32)>,
}

/// A persisted response read back with its child rows
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSubmission {
    pub response: SurveyResponseRecord,
    pub favorite_foods: Vec<FavoriteFoodRecord>,
    pub hobby_ratings: Vec<HobbyRatingRecord>,
}

/// Submissions DAO: the only writer of survey rows
#[derive(Clone)]
pub struct SubmissionsDao {
    db: DatabaseConnection,
}

impl SubmissionsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a response with all of its foods and ratings in one transaction.
    ///
    /// Either every row is committed and the generated response id is
    /// returned, or the transaction is rolled back and nothing is visible.
    pub async fn create(&self, submission: &NewSubmission) -> DatabaseResult<i32> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DatabaseError::Database(format!("Failed to begin transaction: {}", e)))?;

        match insert_submission_rows(&txn, submission).await {
            Ok(response_id) => {
                txn.commit().await.map_err(|e| {
                    DatabaseError::Database(format!("Failed to commit submission: {}", e))
                })?;
                debug!(response_id, "Submission committed");
                Ok(response_id)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!("Failed to roll back submission: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Find a response with its child rows
    pub async fn find_by_id(&self, response_id: i32) -> DatabaseResult<Option<StoredSubmission>> {
        let Some(response) = survey_responses::Entity::find_by_id(response_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let favorite_foods = favorite_foods::Entity::find()
            .filter(favorite_foods::Column::ResponseId.eq(response_id))
            .order_by_asc(favorite_foods::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let hobby_ratings = hobby_ratings::Entity::find()
            .filter(hobby_ratings::Column::ResponseId.eq(response_id))
            .order_by_asc(hobby_ratings::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(Some(StoredSubmission {
            response,
            favorite_foods,
            hobby_ratings,
        }))
    }
}

async fn insert_submission_rows<C: ConnectionTrait>(
    conn: &C,
    submission: &NewSubmission,
) -> DatabaseResult<i32> {
    let record = &submission.response;
    let response = survey_responses::ActiveModel {
        id: ActiveValue::NotSet,
        full_name: Set(record.full_name.clone()),
        email: Set(record.email.clone()),
        date_of_birth: Set(record.date_of_birth),
        contact_number: Set(record.contact_number.clone()),
        age: Set(record.age),
        submitted_at: Set(record.submitted_at),
    }
    .insert(conn)
    .await
    .map_err(|e| DatabaseError::Database(format!("Failed to insert survey response: {}", e)))?;

    let response_id = response.id;

    // insert_many rejects an empty batch
    if !submission.favorite_foods.is_empty() {
        let foods = submission
            .favorite_foods
            .iter()
            .map(|label| favorite_foods::ActiveModel {
                id: ActiveValue::NotSet,
                response_id: Set(response_id),
                food_label: Set(label.clone()),
            });

        favorite_foods::Entity::insert_many(foods)
            .exec(conn)
            .await
            .map_err(|e| {
                DatabaseError::Database(format!("Failed to insert favorite foods: {}", e))
            })?;
    }

    if !submission.hobby_ratings.is_empty() {
        let ratings = submission
            .hobby_ratings
            .iter()
            .map(|(label, value)| hobby_ratings::ActiveModel {
                id: ActiveValue::NotSet,
                response_id: Set(response_id),
                hobby_label: Set(label.clone()),
                rating_value: Set(*value),
            });

        hobby_ratings::Entity::insert_many(ratings)
            .exec(conn)
            .await
            .map_err(|e| {
                DatabaseError::Database(format!("Failed to insert hobby ratings: {}", e))
            })?;
    }

    Ok(response_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::PaginatorTrait;

    fn new_submission(foods: &[&str], ratings: &[(&str, i32)]) -> NewSubmission {
        NewSubmission {
            response: SurveyResponseRecord {
                id: 0,
                full_name: "Lerato Mokoena".to_string(),
                email: "lerato@example.com".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1995, 8, 21).unwrap(),
                contact_number: None,
                age: 29,
                submitted_at: Utc::now(),
            },
            favorite_foods: foods.iter().map(|f| f.to_string()).collect(),
            hobby_ratings: ratings
                .iter()
                .map(|(label, value)| (label.to_string(), *value))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let server = crate::test_utils::TestServerBuilder::new().build().await;
        let dao = server.database.submissions();

        let id = dao
            .create(&new_submission(
                &["Pasta", "Other"],
                &[("I like to watch movies", 4), ("I like to watch TV", 2)],
            ))
            .await
            .unwrap();

        let stored = dao.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.response.id, id);
        assert_eq!(stored.response.contact_number, None);
        let foods: Vec<_> = stored.favorite_foods.iter().map(|f| f.food_label.as_str()).collect();
        assert_eq!(foods, vec!["Pasta", "Other"]);
        assert_eq!(stored.hobby_ratings.len(), 2);
        assert!(stored.hobby_ratings.iter().all(|r| r.response_id == id));
    }

    #[tokio::test]
    async fn test_create_without_foods() {
        let server = crate::test_utils::TestServerBuilder::new().build().await;
        let dao = server.database.submissions();

        let id = dao
            .create(&new_submission(&[], &[("I like to eat out", 5)]))
            .await
            .unwrap();

        let stored = dao.find_by_id(id).await.unwrap().unwrap();
        assert!(stored.favorite_foods.is_empty());
    }

    #[tokio::test]
    async fn test_find_missing() {
        let server = crate::test_utils::TestServerBuilder::new().build().await;
        assert!(server.database.submissions().find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_child_insert_rolls_back_parent() {
        let server = crate::test_utils::TestServerBuilder::new().build().await;
        let connection = server.database.connection();
        connection
            .execute_unprepared(
                "CREATE TRIGGER reject_ratings BEFORE INSERT ON hobby_ratings \
                 BEGIN SELECT RAISE(ABORT, 'ratings unavailable'); END;",
            )
            .await
            .unwrap();

        let result = server
            .database
            .submissions()
            .create(&new_submission(&["Pizza"], &[("I like to watch movies", 3)]))
            .await;
        assert!(matches!(result, Err(DatabaseError::Database(_))));

        assert_eq!(survey_responses::Entity::find().count(connection).await.unwrap(), 0);
        assert_eq!(favorite_foods::Entity::find().count(connection).await.unwrap(), 0);
        assert_eq!(hobby_ratings::Entity::find().count(connection).await.unwrap(), 0);
    }
}
