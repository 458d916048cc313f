use std::time::{Duration, Instant};

use anyhow::Result;
use configs::DatabaseConfig;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use super::db_tests_disabled;
use crate::db::{connect, connect_with_config};

/// Test basic database connection
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    if db_tests_disabled() {
        println!("Skipping database tests (SKIP_DB_TESTS set or DATABASE_URL missing)");
        return Ok(());
    }

    let start = Instant::now();
    let db = connect().await?;
    let connection_time = start.elapsed();

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);

    assert!(connection_time < Duration::from_secs(5), "Connection took too long: {:?}", connection_time);
    Ok(())
}

/// Test connection with pool settings from `[database]`
#[tokio::test]
async fn test_custom_config_connection() -> Result<()> {
    if db_tests_disabled() {
        return Ok(());
    }

    let config = DatabaseConfig {
        url: crate::db::DATABASE_URL.clone(),
        max_connections: 5,
        min_connections: 1,
        connect_timeout_secs: 10,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&config).await?;

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT current_database()".to_string());
    let result = db.query_one(stmt).await?;
    assert!(result.is_some());
    Ok(())
}
