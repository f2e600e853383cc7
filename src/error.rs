// error.rs - Error types for fixture construction and loading
//
// Every failure the crate can report is one variant of FixtureError.
// Construction errors (InvalidSchema, SchemaMismatch, AmbiguousTable) never
// reach the database; connection and load errors carry the sqlx cause.

use std::fmt;

use thiserror::Error;

/// Where inside a table's clean-insert a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Begin,
    Delete,
    /// 0-based index of the row that was rejected
    Insert { row: usize },
    Commit,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStage::Begin => write!(f, "begin"),
            LoadStage::Delete => write!(f, "delete"),
            LoadStage::Insert { row } => write!(f, "insert of row {}", row),
            LoadStage::Commit => write!(f, "commit"),
        }
    }
}

/// Main error type for fixture operations.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// Malformed column or table declaration
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Row width does not match the table's columns
    #[error("Schema mismatch in table {table}: expected {expected} values, got {actual}")]
    SchemaMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// Two tables with the same name in one fixture set
    #[error("Ambiguous table name: {0}")]
    AmbiguousTable(String),

    /// Driver identity could not be resolved
    #[error("Driver unavailable: {0}")]
    DriverUnavailable(String),

    /// Session could not be established
    #[error("Connection to {url} failed: {source}")]
    ConnectionFailed {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// Delete or insert failed while loading a table
    #[error("Load failed for table {table} during {stage}: {source}")]
    LoadFailed {
        table: String,
        stage: LoadStage,
        #[source]
        source: sqlx::Error,
    },

    /// Missing or invalid environment configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FixtureError {
    /// Create a LoadFailed error
    pub fn load_failed(table: impl Into<String>, stage: LoadStage, source: sqlx::Error) -> Self {
        FixtureError::LoadFailed {
            table: table.into(),
            stage,
            source,
        }
    }

    /// Name of the table the error is about, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            FixtureError::SchemaMismatch { table, .. }
            | FixtureError::LoadFailed { table, .. }
            | FixtureError::AmbiguousTable(table) => Some(table.as_str()),
            _ => None,
        }
    }
}

/// Result type alias for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
