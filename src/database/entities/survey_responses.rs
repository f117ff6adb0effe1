use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "survey_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub contact_number: Option<String>,
    /// Age at submission time; never recomputed
    pub age: i32,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite_foods::Entity")]
    FavoriteFoods,
    #[sea_orm(has_many = "super::hobby_ratings::Entity")]
    HobbyRatings,
}

impl Related<super::favorite_foods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoriteFoods.def()
    }
}

impl Related<super::hobby_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HobbyRatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
