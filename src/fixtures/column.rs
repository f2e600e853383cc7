// fixtures/column.rs - Column descriptors
//
// Fixtures are schema-agnostic: a column is just a name. The type is left
// unresolved and the target store coerces the literal on insert.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, Result};

/// Declared type of a fixture column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ColumnType {
    /// Coercion is deferred to the database
    #[default]
    Unknown,
}

/// A named column of a fixture table
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
    column_type: ColumnType,
}

impl Column {
    /// Create a column with an unresolved type.
    ///
    /// The name is not validated here; `Table::new` and `make_columns`
    /// reject empty or duplicated names.
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            column_type: ColumnType::Unknown,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

/// Map column names to columns, in order.
///
/// Fails with `InvalidSchema` when a name is empty or appears twice.
pub fn make_columns<I, S>(names: I) -> Result<Vec<Column>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let columns: Vec<Column> = names.into_iter().map(Column::new).collect();
    validate_columns(&columns)?;
    Ok(columns)
}

pub(crate) fn validate_columns(columns: &[Column]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for (idx, column) in columns.iter().enumerate() {
        if column.name.trim().is_empty() {
            return Err(FixtureError::InvalidSchema(format!(
                "column {} has an empty name",
                idx
            )));
        }
        if !seen.insert(column.name.as_str()) {
            return Err(FixtureError::InvalidSchema(format!(
                "duplicate column name '{}'",
                column.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_columns_preserves_order() {
        let columns = make_columns(["name", "pass", "regtime"]).unwrap();

        let names: Vec<&str> = columns.iter().map(Column::name).collect();
        assert_eq!(names, vec!["name", "pass", "regtime"]);
        assert!(columns
            .iter()
            .all(|c| c.column_type() == ColumnType::Unknown));
    }

    #[test]
    fn test_make_columns_rejects_empty_name() {
        let result = make_columns(["id", ""]);
        assert!(matches!(result, Err(FixtureError::InvalidSchema(_))));

        let result = make_columns(["id", "   "]);
        assert!(matches!(result, Err(FixtureError::InvalidSchema(_))));
    }

    #[test]
    fn test_make_columns_rejects_duplicates() {
        let err = make_columns(["id", "name", "id"]).unwrap_err();
        assert!(err.to_string().contains("duplicate column name 'id'"));
    }

    #[test]
    fn test_make_columns_allows_empty_list() {
        // An empty column list is only rejected once it defines a table
        assert!(make_columns(Vec::<String>::new()).unwrap().is_empty());
    }
}
