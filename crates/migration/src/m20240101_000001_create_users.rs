//! Create `users` table.
//!
//! Identifiers come from a BIGSERIAL sequence; phone and website are nullable.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(users_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

fn users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(big_integer(Users::Id).auto_increment().primary_key())
        .col(string_len(Users::Name, 255).not_null())
        .col(string_len(Users::Username, 255).not_null())
        .col(string_len(Users::Email, 255).not_null())
        .col(ColumnDef::new(Users::Phone).string_len(64).null())
        .col(ColumnDef::new(Users::Website).string_len(255).null())
        .to_owned()
}

#[derive(DeriveIden)]
enum Users { Table, Id, Name, Username, Email, Phone, Website }
