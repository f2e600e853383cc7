// fixtures/row.rs - Positional row values
//
// row[i] belongs to columns[i] of the owning table. Width is checked by
// Table::add_row, not here. A value of None is stored as SQL NULL.

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// One fixture row: nullable string values in column order
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<Option<String>>);

/// Anything that can be one cell of a row. Plain strings are values,
/// `None` is NULL.
pub trait RowValue {
    fn into_value(self) -> Option<String>;
}

impl RowValue for &str {
    fn into_value(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl RowValue for String {
    fn into_value(self) -> Option<String> {
        Some(self)
    }
}

impl RowValue for &String {
    fn into_value(self) -> Option<String> {
        Some(self.clone())
    }
}

impl RowValue for Option<&str> {
    fn into_value(self) -> Option<String> {
        self.map(str::to_string)
    }
}

impl RowValue for Option<String> {
    fn into_value(self) -> Option<String> {
        self
    }
}

impl Row {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Row(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.0
    }

    /// Value at `idx`, `None` for NULL or an index past the end
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).and_then(|v| v.as_deref())
    }

    pub fn is_null(&self, idx: usize) -> bool {
        matches!(self.0.get(idx), Some(None))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Option<String>> {
        self.0.iter()
    }

    pub fn into_values(self) -> Vec<Option<String>> {
        self.0
    }
}

impl Index<usize> for Row {
    type Output = Option<String>;

    fn index(&self, idx: usize) -> &Option<String> {
        &self.0[idx]
    }
}

impl<V: RowValue> FromIterator<V> for Row {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Row(iter.into_iter().map(RowValue::into_value).collect())
    }
}

impl From<Vec<String>> for Row {
    fn from(values: Vec<String>) -> Self {
        Row(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<String>>> for Row {
    fn from(values: Vec<Option<String>>) -> Self {
        Row(values)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Option<String>;
    type IntoIter = std::slice::Iter<'a, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Wrap values into a row without validation.
pub fn make_row<I, V>(values: I) -> Row
where
    I: IntoIterator<Item = V>,
    V: RowValue,
{
    values.into_iter().collect()
}
