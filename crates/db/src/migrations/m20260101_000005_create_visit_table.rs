//! Create visit table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visit::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Visit::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Visit::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Visit::OfficeId).string_len(32).not_null())
                    .col(ColumnDef::new(Visit::AreaId).string_len(32).not_null())
                    .col(ColumnDef::new(Visit::DeskId).string_len(32).not_null())
                    .col(ColumnDef::new(Visit::Date).date().not_null())
                    .col(ColumnDef::new(Visit::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Visit::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visit_user")
                            .from(Visit::Table, Visit::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visit_office")
                            .from(Visit::Table, Visit::OfficeId)
                            .to(Office::Table, Office::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visit_desk")
                            .from(Visit::Table, Visit::DeskId)
                            .to(Desk::Table, Desk::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (office_id, date) - visitor listing and desk availability
        manager
            .create_index(
                Index::create()
                    .name("idx_visit_office_date")
                    .table(Visit::Table)
                    .col(Visit::OfficeId)
                    .col(Visit::Date)
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, date) - upcoming visits per user
        manager
            .create_index(
                Index::create()
                    .name("idx_visit_user_date")
                    .table(Visit::Table)
                    .col(Visit::UserId)
                    .col(Visit::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visit::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Visit {
    Table,
    Id,
    UserId,
    OfficeId,
    AreaId,
    DeskId,
    Date,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Office {
    Table,
    Id,
}

#[derive(Iden)]
enum Desk {
    Table,
    Id,
}
