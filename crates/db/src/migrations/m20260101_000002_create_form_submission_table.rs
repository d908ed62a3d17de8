//! Create form submission table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormSubmission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormSubmission::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FormSubmission::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(FormSubmission::FormId).string_len(64).not_null())
                    .col(ColumnDef::new(FormSubmission::Answers).json_binary().not_null())
                    .col(
                        ColumnDef::new(FormSubmission::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_submission_user")
                            .from(FormSubmission::Table, FormSubmission::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (the purge job deletes by owner)
        manager
            .create_index(
                Index::create()
                    .name("idx_form_submission_user_id")
                    .table(FormSubmission::Table)
                    .col(FormSubmission::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_form_submission_form_id")
                    .table(FormSubmission::Table)
                    .col(FormSubmission::FormId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormSubmission::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FormSubmission {
    Table,
    Id,
    UserId,
    FormId,
    Answers,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
