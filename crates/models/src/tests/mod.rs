/// Database connection and configuration tests
pub mod db_tests;


use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Database tests run only against a real PostgreSQL given by `DATABASE_URL`.
pub(crate) fn db_tests_disabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

/// Connect and make sure the `users` table exists.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
