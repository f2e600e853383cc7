// common/mod.rs - Shared test utilities for loading fixtures
//
// Every test gets its own in-memory SQLite database: each connection to
// sqlite::memory: is a separate database, and a ConnectionHandle owns exactly
// one connection, so tests are isolated without any teardown.

#![allow(dead_code)]

use fixture_loader::ConnectionHandle;

/// Open a fresh in-memory database and run the given DDL on it
pub async fn memory_db(ddl: &[&str]) -> anyhow::Result<ConnectionHandle> {
    let mut handle = ConnectionHandle::open("sqlite", "sqlite::memory:", "", "").await?;
    for sql in ddl {
        execute(&mut handle, sql).await?;
    }
    Ok(handle)
}

/// Run a statement directly on the handle's session
pub async fn execute(handle: &mut ConnectionHandle, sql: &str) -> anyhow::Result<u64> {
    let result = sqlx::query(sql).execute(handle.connection_mut()).await?;
    Ok(result.rows_affected())
}

/// Fetch two text columns, e.g. `SELECT name, pass FROM users ORDER BY rowid`
pub async fn fetch_pairs(
    handle: &mut ConnectionHandle,
    sql: &str,
) -> anyhow::Result<Vec<(String, String)>> {
    let rows: Vec<(String, String)> = sqlx::query_as(sql)
        .fetch_all(handle.connection_mut())
        .await?;
    Ok(rows)
}

pub async fn count_rows(handle: &mut ConnectionHandle, table: &str) -> anyhow::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    let count: (i64,) = sqlx::query_as(&sql)
        .fetch_one(handle.connection_mut())
        .await?;
    Ok(count.0)
}

/// Owned pairs for comparing against fetch_pairs
pub fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}
