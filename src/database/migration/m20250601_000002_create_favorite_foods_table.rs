use super::{FavoriteFoods, SurveyResponses};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FavoriteFoods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteFoods::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FavoriteFoods::ResponseId).integer().not_null())
                    .col(ColumnDef::new(FavoriteFoods::FoodLabel).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_foods_response_id")
                            .from(FavoriteFoods::Table, FavoriteFoods::ResponseId)
                            .to(SurveyResponses::Table, SurveyResponses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Read-back of a single response
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_favorite_foods_response_id")
                    .table(FavoriteFoods::Table)
                    .col(FavoriteFoods::ResponseId)
                    .to_owned(),
            )
            .await?;

        // Food percentage lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_favorite_foods_food_label")
                    .table(FavoriteFoods::Table)
                    .col(FavoriteFoods::FoodLabel)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FavoriteFoods::Table).to_owned())
            .await
    }
}
