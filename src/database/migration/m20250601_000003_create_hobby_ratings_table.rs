use super::{HobbyRatings, SurveyResponses};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HobbyRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HobbyRatings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HobbyRatings::ResponseId).integer().not_null())
                    .col(ColumnDef::new(HobbyRatings::HobbyLabel).string().not_null())
                    .col(ColumnDef::new(HobbyRatings::RatingValue).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hobby_ratings_response_id")
                            .from(HobbyRatings::Table, HobbyRatings::ResponseId)
                            .to(SurveyResponses::Table, SurveyResponses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_hobby_ratings_response_id")
                    .table(HobbyRatings::Table)
                    .col(HobbyRatings::ResponseId)
                    .to_owned(),
            )
            .await?;

        // Per-hobby aggregation groups by label
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_hobby_ratings_hobby_label")
                    .table(HobbyRatings::Table)
                    .col(HobbyRatings::HobbyLabel)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HobbyRatings::Table).to_owned())
            .await
    }
}
