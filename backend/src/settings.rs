//! Server settings loaded via OrthoConfig.
//!
//! Values come from `GEONOTES_*` environment variables, configuration files
//! and command-line flags, in OrthoConfig's usual precedence order.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::LoginMode;
use crate::outbound::persistence::DEFAULT_POOL_SIZE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("pool size must be at least 1")]
    EmptyPool,
}

/// Process-level settings for the HTTP server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GEONOTES")]
pub struct ServerSettings {
    /// Address to listen on. Defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
    /// Apply embedded migrations at startup. Defaults to `true`.
    pub run_migrations: Option<bool>,
    /// Create accounts for unknown addresses at login.
    pub register_on_first_login: Option<bool>,
}

impl ServerSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_size(&self) -> Result<u32, SettingsError> {
        match self.pool_size {
            Some(0) => Err(SettingsError::EmptyPool),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_POOL_SIZE),
        }
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    pub fn login_mode(&self) -> LoginMode {
        if self.register_on_first_login.unwrap_or(false) {
            LoginMode::RegisterOnFirstLogin
        } else {
            LoginMode::Strict
        }
    }
}
