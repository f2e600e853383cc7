// db/connection.rs - Database session used by the loader
//
// A ConnectionHandle owns exactly one sqlx connection. The session is released
// when the handle is dropped, so it is freed on every exit path including a
// failed load; call close() for a graceful shutdown.

use sqlx::any::install_default_drivers;
use sqlx::{AnyConnection, Connection};
use url::Url;

use super::config::ConnectionConfig;
use super::driver::Driver;
use crate::error::{FixtureError, Result};

pub struct ConnectionHandle {
    conn: AnyConnection,
    driver: Driver,
    url: String,
}

impl ConnectionHandle {
    /// Open a session.
    ///
    /// Fails with `DriverUnavailable` when the driver id cannot be resolved
    /// or does not serve the url's scheme, and with `ConnectionFailed` when
    /// the database cannot be reached. A non-empty username replaces the
    /// url's credentials, password included. With an empty username, a
    /// password is only accepted for a url that already names a user.
    pub async fn open(driver_id: &str, url: &str, username: &str, password: &str) -> Result<Self> {
        let driver = Driver::resolve(driver_id)?;
        driver.check_url(url)?;

        let redacted = redact_url(url);
        let connect_url = with_credentials(driver, url, username, password).map_err(|source| {
            FixtureError::ConnectionFailed {
                url: redacted.clone(),
                source,
            }
        })?;

        install_default_drivers();
        let conn = AnyConnection::connect(&connect_url).await.map_err(|source| {
            tracing::error!("Failed to connect to {}: {}", redacted, source);
            FixtureError::ConnectionFailed {
                url: redacted.clone(),
                source,
            }
        })?;

        tracing::info!(driver = %driver, "Connected to database: {}", redacted);

        Ok(ConnectionHandle {
            conn,
            driver,
            url: redacted,
        })
    }

    pub async fn from_config(config: &ConnectionConfig) -> Result<Self> {
        Self::open(
            &config.driver,
            &config.url,
            config.username.as_deref().unwrap_or_default(),
            config.password.as_deref().unwrap_or_default(),
        )
        .await
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Connection url with any password masked
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw access to the session, e.g. to create tables or verify a load
    pub fn connection_mut(&mut self) -> &mut AnyConnection {
        &mut self.conn
    }

    /// Check the session is still alive
    pub async fn ping(&mut self) -> Result<()> {
        self.conn
            .ping()
            .await
            .map_err(|source| FixtureError::ConnectionFailed {
                url: self.url.clone(),
                source,
            })
    }

    /// Release the session gracefully
    pub async fn close(self) -> Result<()> {
        let url = self.url;
        self.conn
            .close()
            .await
            .map_err(|source| FixtureError::ConnectionFailed {
                url: url.clone(),
                source,
            })?;
        tracing::debug!("Closed connection to {}", url);
        Ok(())
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("driver", &self.driver)
            .field("url", &self.url)
            .finish()
    }
}

/// Put username and password into the url's userinfo
fn with_credentials(
    driver: Driver,
    url: &str,
    username: &str,
    password: &str,
) -> std::result::Result<String, sqlx::Error> {
    if !driver.uses_credentials() || (username.is_empty() && password.is_empty()) {
        return Ok(url.to_string());
    }

    let mut parsed = Url::parse(url).map_err(|e| sqlx::Error::Configuration(Box::new(e)))?;
    if username.is_empty() {
        if parsed.username().is_empty() {
            return Err(sqlx::Error::Configuration(
                "a password was given without a username".into(),
            ));
        }
    } else {
        parsed.set_username(username).map_err(|()| {
            let reason = format!("url {} cannot carry a username", redact_url(url));
            sqlx::Error::Configuration(reason.into())
        })?;
    }

    let password = Some(password).filter(|p| !p.is_empty());
    parsed
        .set_password(password)
        .map_err(|()| sqlx::Error::Configuration("url cannot carry a password".into()))?;
    Ok(parsed.to_string())
}

/// Mask the password in a url for logs and errors
pub(crate) fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("***")).is_ok() {
                parsed.to_string()
            } else {
                String::from("<unparseable url>")
            }
        }
        _ => url.to_string(),
    }
}
