//! Create spots table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_locations::Locations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Spots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Spots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Spots::LocationId).integer().not_null())
                    .col(ColumnDef::new(Spots::SpotNumber).string().not_null())
                    .col(ColumnDef::new(Spots::Level).string())
                    .col(ColumnDef::new(Spots::Section).string())
                    .col(
                        ColumnDef::new(Spots::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Spots::SpotType)
                            .string_len(16)
                            .not_null()
                            .default("standard"),
                    )
                    .col(
                        ColumnDef::new(Spots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_spots_location")
                            .from(Spots::Table, Spots::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_spots_location")
                    .table(Spots::Table)
                    .col(Spots::LocationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Spots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Spots {
    Table,
    Id,
    LocationId,
    SpotNumber,
    Level,
    Section,
    IsAvailable,
    SpotType,
    CreatedAt,
}
