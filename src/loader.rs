// loader.rs - Clean-insert of a fixture set
//
// For each table, in declaration order:
//   1. BEGIN
//   2. DELETE FROM <table>
//   3. INSERT every row, in the table's row order
//   4. COMMIT
//
// A failure drops the open transaction, which rolls back that table's delete,
// and stops the load: later tables are not touched. Tables committed earlier
// stay committed. Cross-table ordering (foreign keys) is the caller's job.

use sqlx::{AnyConnection, Connection};

use crate::db::driver::identifier_key;
use crate::db::{queries, ConnectionHandle, Driver};
use crate::error::{FixtureError, LoadStage, Result};
use crate::fixtures::{FixtureSet, Table};

/// Row counts for one loaded table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableLoad {
    pub table: String,
    pub rows_deleted: u64,
    pub rows_inserted: u64,
}

/// Summary of a clean-insert
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub tables: Vec<TableLoad>,
}

impl LoadReport {
    pub fn rows_inserted(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_inserted).sum()
    }

    pub fn rows_deleted(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_deleted).sum()
    }

    /// Look up a table's counts by name, matching names like `FixtureSet::get`
    pub fn table(&self, name: &str) -> Option<&TableLoad> {
        let key = identifier_key(name);
        self.tables.iter().find(|t| identifier_key(&t.table) == key)
    }
}

/// Runs clean-inserts against one borrowed connection.
///
/// Holding the `&mut` borrow guarantees a single load in flight per handle.
pub struct Loader<'c> {
    handle: &'c mut ConnectionHandle,
}

impl<'c> Loader<'c> {
    pub fn new(handle: &'c mut ConnectionHandle) -> Self {
        Loader { handle }
    }

    /// Reset every table of `set` to exactly the fixture rows
    pub async fn clean_insert(&mut self, set: &FixtureSet) -> Result<LoadReport> {
        clean_insert(self.handle, set).await
    }
}

/// Reset every table of `set` to exactly the fixture rows.
///
/// Fails with `LoadFailed` naming the first table that could not be loaded.
pub async fn clean_insert(handle: &mut ConnectionHandle, set: &FixtureSet) -> Result<LoadReport> {
    let driver = handle.driver();
    let mut report = LoadReport::default();

    tracing::info!("Clean-insert of {} table(s) into {}", set.len(), handle.url());

    for table in set {
        match load_table(handle.connection_mut(), driver, table).await {
            Ok(loaded) => {
                tracing::info!(
                    table = %loaded.table,
                    deleted = loaded.rows_deleted,
                    inserted = loaded.rows_inserted,
                    "Table loaded"
                );
                report.tables.push(loaded);
            }
            Err(e) => {
                tracing::warn!("Clean-insert stopped: {}", e);
                return Err(e);
            }
        }
    }

    Ok(report)
}

async fn load_table(conn: &mut AnyConnection, driver: Driver, table: &Table) -> Result<TableLoad> {
    let name = table.name();
    let mut tx = conn
        .begin()
        .await
        .map_err(|e| FixtureError::load_failed(name, LoadStage::Begin, e))?;

    let delete_sql = queries::delete_all(driver, table);
    tracing::debug!("{}", delete_sql);
    let rows_deleted = sqlx::query(&delete_sql)
        .execute(&mut *tx)
        .await
        .map_err(|e| FixtureError::load_failed(name, LoadStage::Delete, e))?
        .rows_affected();

    let mut rows_inserted = 0;
    for (idx, row) in table.rows().iter().enumerate() {
        let insert_sql = queries::insert_row(driver, table, row);
        tracing::debug!("{}", insert_sql);
        // Every insert has unique text, so don't fill the statement cache
        sqlx::query(&insert_sql)
            .persistent(false)
            .execute(&mut *tx)
            .await
            .map_err(|e| FixtureError::load_failed(name, LoadStage::Insert { row: idx }, e))?;
        rows_inserted += 1;
    }

    tx.commit()
        .await
        .map_err(|e| FixtureError::load_failed(name, LoadStage::Commit, e))?;

    Ok(TableLoad {
        table: name.to_string(),
        rows_deleted,
        rows_inserted,
    })
}
