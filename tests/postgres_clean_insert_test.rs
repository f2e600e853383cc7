// tests/postgres_clean_insert_test.rs
// Clean-insert against a real PostgreSQL server.
//
// Prerequisites: DATABASE_URL pointing at PostgreSQL (a .env file works).
// Without it the tests print a notice and pass. Each test works in its own
// schema, dropped again at the end.

use anyhow::Result;
use fixture_loader::{
    clean_insert, cols, fixture_set, row, table, ConnectionConfig, ConnectionHandle, Driver,
    FixtureError, LoadStage,
};

async fn postgres_handle() -> Result<Option<ConnectionHandle>> {
    let config = match ConnectionConfig::from_env() {
        Ok(config) if config.driver.parse::<Driver>().ok() == Some(Driver::Postgres) => config,
        _ => {
            println!("DATABASE_URL is not a PostgreSQL url - skipping");
            return Ok(None);
        }
    };
    Ok(Some(ConnectionHandle::from_config(&config).await?))
}

async fn run(handle: &mut ConnectionHandle, sql: &str) -> Result<()> {
    sqlx::query(sql).execute(handle.connection_mut()).await?;
    Ok(())
}

#[tokio::test]
async fn test_postgres_users_scenario() -> Result<()> {
    let Some(mut handle) = postgres_handle().await? else {
        return Ok(());
    };
    let schema = "fixture_loader_users";

    run(&mut handle, &format!("DROP SCHEMA IF EXISTS {} CASCADE", schema)).await?;
    run(&mut handle, &format!("CREATE SCHEMA {}", schema)).await?;
    run(
        &mut handle,
        &format!(
            "CREATE TABLE {}.users (id BIGSERIAL PRIMARY KEY, name TEXT, pass TEXT, regtime DATE)",
            schema
        ),
    )
    .await?;
    run(
        &mut handle,
        &format!("INSERT INTO {}.users (name, pass) VALUES ('mallory', 'z')", schema),
    )
    .await?;

    // Unquoted names fold to lower case, so USERS reaches users
    let set = fixture_set([table(
        format!("{}.USERS", schema),
        cols(["name", "pass", "regtime"])?,
        [
            row(["alice", "x", "2024-01-05"]),
            row(["bob", "y", "2024-01-06"]),
        ],
    )?])?;

    // Twice: the second run must leave the same contents
    clean_insert(&mut handle, &set).await?;
    let report = clean_insert(&mut handle, &set).await?;
    assert_eq!(report.rows_deleted(), 2);

    let stored: Vec<(String, String, String)> = sqlx::query_as(&format!(
        "SELECT name, pass, regtime::text FROM {}.users ORDER BY id",
        schema
    ))
    .fetch_all(handle.connection_mut())
    .await?;
    assert_eq!(
        stored,
        vec![
            ("alice".to_string(), "x".to_string(), "2024-01-05".to_string()),
            ("bob".to_string(), "y".to_string(), "2024-01-06".to_string()),
        ]
    );

    run(&mut handle, &format!("DROP SCHEMA {} CASCADE", schema)).await?;
    handle.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_postgres_rejected_literal_rolls_back() -> Result<()> {
    let Some(mut handle) = postgres_handle().await? else {
        return Ok(());
    };
    let schema = "fixture_loader_rollback";

    run(&mut handle, &format!("DROP SCHEMA IF EXISTS {} CASCADE", schema)).await?;
    run(&mut handle, &format!("CREATE SCHEMA {}", schema)).await?;
    run(
        &mut handle,
        &format!("CREATE TABLE {}.counters (name TEXT, hits INTEGER)", schema),
    )
    .await?;
    run(
        &mut handle,
        &format!("INSERT INTO {}.counters VALUES ('kept', 1)", schema),
    )
    .await?;

    let set = fixture_set([table(
        format!("{}.counters", schema),
        cols(["name", "hits"])?,
        [row(["ok", "2"]), row(["bad", "not a number"])],
    )?])?;

    let err = clean_insert(&mut handle, &set).await.unwrap_err();
    assert!(matches!(
        err,
        FixtureError::LoadFailed {
            stage: LoadStage::Insert { row: 1 },
            ..
        }
    ));

    let count: (i64,) = sqlx::query_as(&format!(
        "SELECT COUNT(*) FROM {}.counters WHERE name = 'kept'",
        schema
    ))
    .fetch_one(handle.connection_mut())
    .await?;
    assert_eq!(count.0, 1);

    run(&mut handle, &format!("DROP SCHEMA {} CASCADE", schema)).await?;
    Ok(())
}

#[tokio::test]
async fn test_postgres_quoted_table_and_null_values() -> Result<()> {
    let Some(mut handle) = postgres_handle().await? else {
        return Ok(());
    };
    let schema = "fixture_loader_quoted";

    run(&mut handle, &format!("DROP SCHEMA IF EXISTS {} CASCADE", schema)).await?;
    run(&mut handle, &format!("CREATE SCHEMA {}", schema)).await?;
    run(
        &mut handle,
        &format!(
            "CREATE TABLE {}.\"Audit Log\" (entry TEXT NOT NULL, parent INTEGER NULL)",
            schema
        ),
    )
    .await?;

    let set = fixture_set([table(
        format!("{}.Audit Log", schema),
        cols(["entry", "parent"])?,
        [row([Some("root"), None]), row([Some("child"), Some("1")])],
    )?])?;
    clean_insert(&mut handle, &set).await?;

    let nulls: (i64,) = sqlx::query_as(&format!(
        "SELECT COUNT(*) FROM {}.\"Audit Log\" WHERE parent IS NULL",
        schema
    ))
    .fetch_one(handle.connection_mut())
    .await?;
    assert_eq!(nulls.0, 1);

    run(&mut handle, &format!("DROP SCHEMA {} CASCADE", schema)).await?;
    Ok(())
}
