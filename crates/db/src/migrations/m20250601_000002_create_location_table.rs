//! Create location table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Location::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Location::Name).string_len(120).not_null())
                    .col(ColumnDef::new(Location::Address).string_len(200).not_null())
                    .col(ColumnDef::new(Location::Phone).string_len(40).not_null().default(""))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Location::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Location {
    Table,
    Id,
    Name,
    Address,
    Phone,
}
