//! Create tag and user_tag tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tag::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Tag::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Tag::AltNames).json_binary().not_null())
                    .col(ColumnDef::new(Tag::Category).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Tag::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (name, category)
        manager
            .create_index(
                Index::create()
                    .name("idx_tag_name_category")
                    .table(Tag::Table)
                    .col(Tag::Name)
                    .col(Tag::Category)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserTag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserTag::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(UserTag::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(UserTag::TagId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(UserTag::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_tag_user")
                            .from(UserTag::Table, UserTag::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_tag_tag")
                            .from(UserTag::Table, UserTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, tag_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_tag_user_tag")
                    .table(UserTag::Table)
                    .col(UserTag::UserId)
                    .col(UserTag::TagId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tag {
    Table,
    Id,
    Name,
    AltNames,
    Category,
    CreatedAt,
}

#[derive(Iden)]
enum UserTag {
    Table,
    Id,
    UserId,
    TagId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
