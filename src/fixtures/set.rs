// fixtures/set.rs - Tables aggregated for one load
//
// Table names are unique the way the database sees them: plain names ignore
// ASCII case, so "users" and "USERS" cannot both appear in one set, while
// names that need quoting ("Audit Log") compare exactly. Declaration order
// is kept.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::table::Table;
use super::FixtureSource;
use crate::db::driver::identifier_key;
use crate::error::{FixtureError, Result};

/// Seed data for one clean-insert
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Table>", into = "Vec<Table>")]
pub struct FixtureSet {
    tables: Vec<Table>,
    by_name: HashMap<String, usize>,
}

impl FixtureSet {
    /// Aggregate tables, failing with `AmbiguousTable` on the first
    /// repeated name. Nothing is kept from a failed construction.
    pub fn new<I>(tables: I) -> Result<Self>
    where
        I: IntoIterator<Item = Table>,
    {
        let mut set = FixtureSet::default();
        for table in tables {
            let key = identifier_key(table.name());
            if set.by_name.contains_key(&key) {
                return Err(FixtureError::AmbiguousTable(table.name().to_string()));
            }
            set.by_name.insert(key, set.tables.len());
            set.tables.push(table);
        }
        Ok(set)
    }

    /// Build a set from any fixture source
    pub fn from_source<S: FixtureSource + ?Sized>(source: &S) -> Result<Self> {
        FixtureSet::new(source.tables()?)
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.by_name
            .get(&identifier_key(name))
            .map(|&idx| &self.tables[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&identifier_key(name))
    }

    /// Tables in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Table> {
        self.tables.iter()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.iter().map(Table::name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of rows across all tables
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(Table::row_count).sum()
    }

    pub fn into_tables(self) -> Vec<Table> {
        self.tables
    }
}

impl<'a> IntoIterator for &'a FixtureSet {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

impl TryFrom<Vec<Table>> for FixtureSet {
    type Error = FixtureError;

    fn try_from(tables: Vec<Table>) -> Result<Self> {
        FixtureSet::new(tables)
    }
}

impl From<FixtureSet> for Vec<Table> {
    fn from(set: FixtureSet) -> Self {
        set.tables
    }
}
