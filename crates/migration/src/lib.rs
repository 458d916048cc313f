//! Migrator for the `users` table.
//! The case-insensitive email index is applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_add_email_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_email_index::Migration),
        ]
    }
}
