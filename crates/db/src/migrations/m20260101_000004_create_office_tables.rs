//! Create office, area and desk tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Office::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Office::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Office::Name).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Office::AllowDeskReservation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Office::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_office_name")
                    .table(Office::Table)
                    .col(Office::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Area::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Area::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Area::OfficeId).string_len(32).not_null())
                    .col(ColumnDef::new(Area::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Area::MapUrl).string_len(1024))
                    .col(
                        ColumnDef::new(Area::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_area_office")
                            .from(Area::Table, Area::OfficeId)
                            .to(Office::Table, Office::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_area_office_id")
                    .table(Area::Table)
                    .col(Area::OfficeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Desk::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Desk::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Desk::AreaId).string_len(32).not_null())
                    .col(ColumnDef::new(Desk::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Desk::PositionX).double().not_null())
                    .col(ColumnDef::new(Desk::PositionY).double().not_null())
                    .col(
                        ColumnDef::new(Desk::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_desk_area")
                            .from(Desk::Table, Desk::AreaId)
                            .to(Area::Table, Area::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_desk_area_id")
                    .table(Desk::Table)
                    .col(Desk::AreaId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Desk::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Area::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Office::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Office {
    Table,
    Id,
    Name,
    AllowDeskReservation,
    CreatedAt,
}

#[derive(Iden)]
enum Area {
    Table,
    Id,
    OfficeId,
    Name,
    MapUrl,
    CreatedAt,
}

#[derive(Iden)]
enum Desk {
    Table,
    Id,
    AreaId,
    Name,
    PositionX,
    PositionY,
    CreatedAt,
}
