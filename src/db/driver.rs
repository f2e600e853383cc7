// db/driver.rs - Driver identities and SQL quoting rules
//
// A driver id such as "postgres" resolves to a Driver. Each driver knows the
// URL schemes it serves, whether its sqlx backend was compiled in, and how
// to quote identifiers and string literals.
//
// Plain identifiers ([A-Za-z_][A-Za-z0-9_$]*) are emitted unquoted, so the
// database folds their case the way it does for hand-written SQL: "USERS"
// reaches a table created as `users`. Anything else is quoted and matched
// exactly.

use std::fmt;
use std::str::FromStr;

use crate::error::FixtureError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Driver {
    Postgres,
    Sqlite,
    MySql,
}

impl Driver {
    /// Resolve a driver id, failing with `DriverUnavailable` when it is
    /// unknown or its backend is not compiled into this build.
    pub fn resolve(driver_id: &str) -> Result<Self, FixtureError> {
        let driver: Driver = driver_id.parse()?;
        if !driver.is_compiled() {
            return Err(FixtureError::DriverUnavailable(format!(
                "driver '{}' is not enabled in this build (cargo feature '{}')",
                driver_id,
                driver.name()
            )));
        }
        Ok(driver)
    }

    /// Guess the driver from a connection URL's scheme
    pub fn from_url(url: &str) -> Result<Self, FixtureError> {
        let scheme = url_scheme(url);
        [Driver::Postgres, Driver::Sqlite, Driver::MySql]
            .into_iter()
            .find(|d| d.schemes().contains(&scheme.as_str()))
            .ok_or_else(|| {
                FixtureError::DriverUnavailable(format!("no driver serves '{}' urls", scheme))
            })
    }

    /// Canonical id, also the name of the cargo feature enabling the driver
    pub fn name(&self) -> &'static str {
        match self {
            Driver::Postgres => "postgres",
            Driver::Sqlite => "sqlite",
            Driver::MySql => "mysql",
        }
    }

    pub fn schemes(&self) -> &'static [&'static str] {
        match self {
            Driver::Postgres => &["postgres", "postgresql"],
            Driver::Sqlite => &["sqlite"],
            Driver::MySql => &["mysql", "mariadb"],
        }
    }

    pub fn is_compiled(&self) -> bool {
        match self {
            Driver::Postgres => cfg!(feature = "postgres"),
            Driver::Sqlite => cfg!(feature = "sqlite"),
            Driver::MySql => cfg!(feature = "mysql"),
        }
    }

    /// Check that `url` uses one of this driver's schemes
    pub fn check_url(&self, url: &str) -> Result<(), FixtureError> {
        let scheme = url_scheme(url);
        if self.schemes().contains(&scheme.as_str()) {
            Ok(())
        } else {
            Err(FixtureError::DriverUnavailable(format!(
                "driver '{}' cannot open '{}' urls",
                self.name(),
                scheme
            )))
        }
    }

    /// Whether the server takes a username and password in the URL
    pub fn uses_credentials(&self) -> bool {
        !matches!(self, Driver::Sqlite)
    }

    /// Render a possibly schema-qualified identifier, one part at a time.
    /// Only parts that are not plain identifiers get quoted.
    pub fn quote_ident(&self, name: &str) -> String {
        name.split('.')
            .map(|part| {
                if is_plain_identifier(part) {
                    part.to_string()
                } else {
                    match self {
                        Driver::MySql => format!("`{}`", part.replace('`', "``")),
                        Driver::Postgres | Driver::Sqlite => {
                            format!("\"{}\"", part.replace('"', "\"\""))
                        }
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quote a value as a string literal. The store coerces it to the
    /// column's type on insert.
    pub fn quote_literal(&self, value: &str) -> String {
        let escaped = match self {
            // Backslash is an escape character in MySQL string literals
            Driver::MySql => value.replace('\\', "\\\\").replace('\'', "''"),
            Driver::Postgres | Driver::Sqlite => value.replace('\'', "''"),
        };
        format!("'{}'", escaped)
    }
}

impl FromStr for Driver {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Driver::Postgres),
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            "mysql" | "mariadb" => Ok(Driver::MySql),
            _ => Err(FixtureError::DriverUnavailable(format!(
                "unknown driver '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether `part` can be written without quotes
pub(crate) fn is_plain_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Key under which two table names refer to the same table: plain parts
/// compare ignoring case, quoted parts compare exactly.
pub(crate) fn identifier_key(name: &str) -> String {
    name.split('.')
        .map(|part| {
            if is_plain_identifier(part) {
                part.to_ascii_lowercase()
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn url_scheme(url: &str) -> String {
    url.split(':').next().unwrap_or_default().to_ascii_lowercase()
}
