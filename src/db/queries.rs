// db/queries.rs - SQL for the clean-insert operation
//
// Pure functions from a driver and a fixture table to statement text.
// Only two statements are ever issued: delete-all and single-row insert.

use super::driver::Driver;
use crate::fixtures::{Row, Table};

/// `DELETE FROM <table>`
pub fn delete_all(driver: Driver, table: &Table) -> String {
    format!("DELETE FROM {}", driver.quote_ident(table.name()))
}

/// `INSERT INTO <table> (<columns>) VALUES (<literals>)` for one row.
/// Missing values are written as `NULL`.
pub fn insert_row(driver: Driver, table: &Table, row: &Row) -> String {
    let columns: Vec<String> = table
        .column_names()
        .map(|name| driver.quote_ident(name))
        .collect();
    let values: Vec<String> = row
        .iter()
        .map(|v| match v {
            Some(value) => driver.quote_literal(value),
            None => "NULL".to_string(),
        })
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        driver.quote_ident(table.name()),
        columns.join(", "),
        values.join(", ")
    )
}
