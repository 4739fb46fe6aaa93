//! Create application table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Application::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Application::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Application::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Application::PetId).string_len(32).not_null())
                    .col(ColumnDef::new(Application::Message).text().not_null())
                    .col(ColumnDef::new(Application::ContactPhone).string_len(40).not_null())
                    .col(ColumnDef::new(Application::LivingSituation).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Application::HasOtherPets)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Application::OtherPetsDetails).text())
                    .col(
                        ColumnDef::new(Application::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Application::AdminNotes).text())
                    .col(
                        ColumnDef::new(Application::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Application::ReviewedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_user")
                            .from(Application::Table, Application::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_pet")
                            .from(Application::Table, Application::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, pet_id, status) for the duplicate-pending lookup.
        // No uniqueness here: historical approved/rejected rows for the same
        // pair are allowed, and a partial unique index would not be portable.
        manager
            .create_index(
                Index::create()
                    .name("idx_application_user_pet_status")
                    .table(Application::Table)
                    .col(Application::UserId)
                    .col(Application::PetId)
                    .col(Application::Status)
                    .to_owned(),
            )
            .await?;

        // Index: submitted_at (listing sort order)
        manager
            .create_index(
                Index::create()
                    .name("idx_application_submitted_at")
                    .table(Application::Table)
                    .col(Application::SubmittedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Application {
    Table,
    Id,
    UserId,
    PetId,
    Message,
    ContactPhone,
    LivingSituation,
    HasOtherPets,
    OtherPetsDetails,
    Status,
    AdminNotes,
    SubmittedAt,
    ReviewedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Pet {
    Table,
    Id,
}
