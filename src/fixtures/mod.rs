// fixtures/mod.rs - Fixture construction DSL
//
// Test setup code declares reference data with a few free functions:
//
//   let users = table(
//       "USERS",
//       cols(["name", "pass", "regtime"])?,
//       [
//           row(["alice", "x", format_date(&today).as_str()]),
//           row(["bob", "y", format_date(&today).as_str()]),
//       ],
//   )?;
//   let set = fixture_set([users])?;
//
// The resulting FixtureSet is handed to the loader for a clean-insert.

pub mod column;
pub mod format;
pub mod row;
pub mod set;
pub mod table;

pub use column::{make_columns, Column, ColumnType};
pub use format::{format_date, format_time, format_timestamp};
pub use row::{make_row, Row, RowValue};
pub use set::FixtureSet;
pub use table::Table;

use crate::error::Result;

/// Anything that can produce fixture tables, e.g. a file-format adapter.
///
/// The tables are validated again when aggregated into a FixtureSet.
pub trait FixtureSource {
    fn tables(&self) -> Result<Vec<Table>>;
}

impl FixtureSource for Vec<Table> {
    fn tables(&self) -> Result<Vec<Table>> {
        Ok(self.clone())
    }
}

impl FixtureSource for [Table] {
    fn tables(&self) -> Result<Vec<Table>> {
        Ok(self.to_vec())
    }
}

impl FixtureSource for FixtureSet {
    fn tables(&self) -> Result<Vec<Table>> {
        Ok(self.iter().cloned().collect())
    }
}

/// Column names to columns; see `make_columns`
pub fn cols<I, S>(names: I) -> Result<Vec<Column>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    make_columns(names)
}

/// Values to a row; see `make_row`. Pass `None` for NULL.
pub fn row<I, V>(values: I) -> Row
where
    I: IntoIterator<Item = V>,
    V: RowValue,
{
    make_row(values)
}

/// Define a table and append its rows in order
pub fn table<R>(name: impl Into<String>, columns: Vec<Column>, rows: R) -> Result<Table>
where
    R: IntoIterator<Item = Row>,
{
    let mut table = Table::new(name, columns)?;
    table.add_rows(rows)?;
    Ok(table)
}

/// Combine tables into a set with unique names
pub fn fixture_set<I>(tables: I) -> Result<FixtureSet>
where
    I: IntoIterator<Item = Table>,
{
    FixtureSet::new(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FixtureError;

    #[test]
    fn test_users_scenario_builds() {
        let users = table(
            "USERS",
            cols(["name", "pass"]).unwrap(),
            [row(["alice", "x"]), row(["bob", "y"])],
        )
        .unwrap();

        assert_eq!(users.row_count(), 2);
        assert_eq!(users.rows()[1], row(["bob", "y"]));
    }

    #[test]
    fn test_short_row_fails_at_append() {
        let err = table("T", cols(["a", "b"]).unwrap(), [row(["x"])]).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::SchemaMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_tables_fail() {
        let a1 = table("A", cols(["x"]).unwrap(), [row(["1"])]).unwrap();
        let a2 = table("A", cols(["y"]).unwrap(), [row(["2"])]).unwrap();
        let err = fixture_set([a1, a2]).unwrap_err();
        assert!(matches!(err, FixtureError::AmbiguousTable(_)));
    }

    #[test]
    fn test_from_source_revalidates() {
        let a = table("A", cols(["x"]).unwrap(), [row(["1"])]).unwrap();
        let source = vec![a.clone(), a];
        assert!(FixtureSet::from_source(&source).is_err());

        let set = fixture_set([table("B", cols(["y"]).unwrap(), [row(["2"])]).unwrap()]).unwrap();
        let copy = FixtureSet::from_source(&set).unwrap();
        assert_eq!(copy, set);
    }

    #[test]
    fn test_formatted_values_fit_rows() {
        let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let regtime = format_date(&day);
        let t = table(
            "AIO",
            cols(["name", "pass", "regtime"]).unwrap(),
            [row(["aaa", "aaa", regtime.as_str()])],
        )
        .unwrap();
        assert_eq!(t.rows()[0].get(2), Some("2024-01-05"));
    }
}
