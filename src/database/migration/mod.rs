use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20250601_000001_create_survey_responses_table;
mod m20250601_000002_create_favorite_foods_table;
mod m20250601_000003_create_hobby_ratings_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_survey_responses_table::Migration),
            Box::new(m20250601_000002_create_favorite_foods_table::Migration),
            Box::new(m20250601_000003_create_hobby_ratings_table::Migration),
        ]
    }
}

/// Common table and column identifiers
#[derive(Iden)]
pub enum SurveyResponses {
    Table,
    Id,
    FullName,
    Email,
    DateOfBirth,
    ContactNumber,
    Age,
    SubmittedAt,
}

#[derive(Iden)]
pub enum FavoriteFoods {
    Table,
    Id,
    ResponseId,
    FoodLabel,
}

#[derive(Iden)]
pub enum HobbyRatings {
    Table,
    Id,
    ResponseId,
    HobbyLabel,
    RatingValue,
}
