// lib.rs - Root module for the fixture_loader library
//
// Builds reference data in memory and clean-inserts it into a database
// before a test runs:
//
//   let set = fixture_set([table(
//       "USERS",
//       cols(["name", "pass"])?,
//       [row(["alice", "x"]), row(["bob", "y"])],
//   )?])?;
//   let mut handle = ConnectionHandle::open("postgres", &url, "sa", "").await?;
//   clean_insert(&mut handle, &set).await?;

pub mod db;
pub mod error;
/// Tables, rows and columns, and the functions that build them
pub mod fixtures;
pub mod loader;

pub use db::{ConnectionConfig, ConnectionHandle, Driver};
pub use error::{FixtureError, LoadStage, Result};
pub use fixtures::{
    cols, fixture_set, format_date, format_time, format_timestamp, row, table, Column, ColumnType,
    FixtureSet, FixtureSource, Row, RowValue, Table,
};
pub use loader::{clean_insert, LoadReport, Loader, TableLoad};
