use super::SurveyResponses;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SurveyResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SurveyResponses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SurveyResponses::FullName).string().not_null())
                    .col(ColumnDef::new(SurveyResponses::Email).string().not_null())
                    .col(ColumnDef::new(SurveyResponses::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(SurveyResponses::ContactNumber).string().null())
                    .col(ColumnDef::new(SurveyResponses::Age).integer().not_null())
                    .col(
                        ColumnDef::new(SurveyResponses::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SurveyResponses::Table).to_owned())
            .await
    }
}
