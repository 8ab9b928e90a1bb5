//! Server configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `EVENTS_*` environment variables over defaults.
//! The database URL additionally falls back to the conventional
//! `DATABASE_URL` variable.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Problems found after the raw settings were loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("no database configured: set EVENTS_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("invalid bind host `{host}`")]
    InvalidHost { host: String },
}

/// Configuration for the HTTP server and its database pool.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVENTS")]
pub struct ServerSettings {
    /// TCP port to listen on.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Seconds to wait for a pooled connection before failing a request.
    #[ortho_config(default = 30)]
    pub pool_connection_timeout_secs: u64,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        host.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.port))
            .map_err(|_| SettingsError::InvalidHost {
                host: host.to_owned(),
            })
    }

    /// Database URL from settings, or from `DATABASE_URL` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when neither source
    /// provides a non-empty value.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        self.database_url
            .clone()
            .or_else(|| std::env::var(FALLBACK_DATABASE_URL_VAR).ok())
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    #[must_use]
    pub fn pool_connection_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_connection_timeout_secs)
    }
}
