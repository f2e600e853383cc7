// fixtures/table.rs - A named table of fixture rows
//
// Rows keep their append order; that is the order they are inserted in.

use serde::{Deserialize, Serialize};

use super::column::{validate_columns, Column};
use super::row::Row;
use crate::error::{FixtureError, Result};

/// Reference data for one database table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableDef", into = "TableDef")]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table.
    ///
    /// Fails with `InvalidSchema` if the name is empty, there are no columns,
    /// or a column name is empty or repeated.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FixtureError::InvalidSchema(
                "table name must not be empty".to_string(),
            ));
        }
        if columns.is_empty() {
            return Err(FixtureError::InvalidSchema(format!(
                "table '{}' has no columns",
                name
            )));
        }
        validate_columns(&columns).map_err(|e| {
            FixtureError::InvalidSchema(format!("table '{}': {}", name, schema_reason(e)))
        })?;

        Ok(Table {
            name,
            columns,
            rows: Vec::new(),
        })
    }

    /// Append a row. A row of the wrong width is rejected and the table is
    /// left untouched.
    pub fn add_row(&mut self, row: Row) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(FixtureError::SchemaMismatch {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append rows in order. If any row has the wrong width, none of them
    /// is appended and the first mismatch is reported.
    pub fn add_rows<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Row>,
    {
        let rows: Vec<Row> = rows.into_iter().collect();
        if let Some(bad) = rows.iter().find(|r| r.len() != self.columns.len()) {
            return Err(FixtureError::SchemaMismatch {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: bad.len(),
            });
        }
        self.rows.extend(rows);
        Ok(())
    }

    /// Builder form of `add_row`
    pub fn with_row(mut self, row: Row) -> Result<Self> {
        self.add_row(row)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn schema_reason(err: FixtureError) -> String {
    match err {
        FixtureError::InvalidSchema(reason) => reason,
        other => other.to_string(),
    }
}

/// Serialized shape of a table: column names plus rows of strings
#[derive(Serialize, Deserialize)]
struct TableDef {
    name: String,
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl TryFrom<TableDef> for Table {
    type Error = FixtureError;

    fn try_from(def: TableDef) -> Result<Self> {
        let columns = def.columns.into_iter().map(Column::new).collect();
        let mut table = Table::new(def.name, columns)?;
        table.add_rows(def.rows)?;
        Ok(table)
    }
}

impl From<Table> for TableDef {
    fn from(table: Table) -> Self {
        TableDef {
            columns: table.columns.iter().map(|c| c.name().to_string()).collect(),
            name: table.name,
            rows: table.rows,
        }
    }
}
