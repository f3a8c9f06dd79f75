use sea_orm_migration::prelude::*;

use super::m20240805_120000_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::Description).string().not_null())
                    .col(ColumnDef::new(Entries::Month).integer().not_null())
                    .col(ColumnDef::new(Entries::Year).integer().not_null())
                    .col(ColumnDef::new(Entries::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Entries::Kind).string().not_null())
                    .col(ColumnDef::new(Entries::Status).string().not_null())
                    .col(ColumnDef::new(Entries::RegisteredOn).date().not_null())
                    .col(ColumnDef::new(Entries::UserId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entries-user_id")
                            .from(Entries::Table, Entries::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Balance queries filter on these three columns.
        manager
            .create_index(
                Index::create()
                    .name("idx-entries-user_kind_status")
                    .table(Entries::Table)
                    .col(Entries::UserId)
                    .col(Entries::Kind)
                    .col(Entries::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub enum Entries {
    Table,
    Id,
    Description,
    Month,
    Year,
    AmountMinor,
    Kind,
    Status,
    RegisteredOn,
    UserId,
}
