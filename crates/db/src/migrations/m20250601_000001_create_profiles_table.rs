//! Create `profiles` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profiles::FullName).string_len(256))
                    .col(ColumnDef::new(Profiles::Username).string_len(128))
                    .col(ColumnDef::new(Profiles::AvatarUrl).string_len(2048))
                    .col(ColumnDef::new(Profiles::Email).string_len(256))
                    .col(
                        ColumnDef::new(Profiles::EmailVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Profiles::EmailVerificationToken).string_len(64))
                    .col(
                        ColumnDef::new(Profiles::EmailVerificationSentAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: username (nullable, so multiple NULLs are allowed)
        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_username")
                    .table(Profiles::Table)
                    .col(Profiles::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: verification token (for redemption lookups)
        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_email_verification_token")
                    .table(Profiles::Table)
                    .col(Profiles::EmailVerificationToken)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
    FullName,
    Username,
    AvatarUrl,
    Email,
    EmailVerified,
    EmailVerificationToken,
    EmailVerificationSentAt,
    CreatedAt,
}
