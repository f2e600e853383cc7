// db/config.rs - Connection settings
//
// Settings come either from code (ConnectionConfig::new) or from the
// environment, with a .env file loaded first:
//   DATABASE_URL          connection url (required)
//   FIXTURE_DB_DRIVER     driver id, inferred from the url scheme if unset
//   FIXTURE_DB_USER       username
//   FIXTURE_DB_PASSWORD   password

use std::env;

use super::driver::Driver;
use crate::error::{FixtureError, Result};

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DRIVER_VAR: &str = "FIXTURE_DB_DRIVER";
pub const USER_VAR: &str = "FIXTURE_DB_USER";
pub const PASSWORD_VAR: &str = "FIXTURE_DB_PASSWORD";

/// Everything needed to open a ConnectionHandle
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub driver: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConnectionConfig {
    pub fn new(driver: impl Into<String>, url: impl Into<String>) -> Self {
        ConnectionConfig {
            driver: driver.into(),
            url: url.into(),
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Read settings from the process environment after loading `.env`
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| FixtureError::Config(format!("{} must be set", DATABASE_URL_VAR)))?;

        let driver = match lookup(DRIVER_VAR).filter(|v| !v.trim().is_empty()) {
            Some(driver) => driver,
            None => Driver::from_url(&url)
                .map_err(|e| {
                    FixtureError::Config(format!("{} is unset and {}", DRIVER_VAR, reason(e)))
                })?
                .name()
                .to_string(),
        };

        Ok(ConnectionConfig {
            driver,
            url,
            username: lookup(USER_VAR),
            password: lookup(PASSWORD_VAR),
        })
    }
}

// Keep passwords out of debug output and logs
impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("driver", &self.driver)
            .field("url", &super::connection::redact_url(&self.url))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

fn reason(err: FixtureError) -> String {
    match err {
        FixtureError::DriverUnavailable(reason) => reason,
        other => other.to_string(),
    }
}
