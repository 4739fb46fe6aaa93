//! Create pet table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pet::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pet::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Pet::Name).string_len(120).not_null())
                    .col(ColumnDef::new(Pet::Species).string_len(80).not_null())
                    .col(ColumnDef::new(Pet::Age).integer().not_null())
                    .col(ColumnDef::new(Pet::Description).text())
                    .col(ColumnDef::new(Pet::PhotoUrl).string_len(255))
                    .col(ColumnDef::new(Pet::LocationId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Pet::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_location")
                            .from(Pet::Table, Pet::LocationId)
                            .to(Location::Table, Location::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: location_id (for listing pets per shelter)
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_location_id")
                    .table(Pet::Table)
                    .col(Pet::LocationId)
                    .to_owned(),
            )
            .await?;

        // Index: status (for approved-only browsing)
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_status")
                    .table(Pet::Table)
                    .col(Pet::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pet::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Pet {
    Table,
    Id,
    Name,
    Species,
    Age,
    Description,
    PhotoUrl,
    LocationId,
    Status,
}

#[derive(Iden)]
enum Location {
    Table,
    Id,
}
