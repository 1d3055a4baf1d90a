//! Server settings loaded via OrthoConfig.
//!
//! Every field can be set from `SERVICE_DESK_*` environment variables, a
//! configuration file, or the command line.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_SHARED_PASSWORD;

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
}

/// Process-wide settings for the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVICE_DESK")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Write the demo accounts and services into the database on startup.
    #[ortho_config(default = false)]
    pub seed_demo_data: bool,
    /// Password every account logs in with.
    pub shared_password: Option<String>,
}

impl ServerSettings {
    /// The configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn shared_password(&self) -> &str {
        self.shared_password
            .as_deref()
            .unwrap_or(DEFAULT_SHARED_PASSWORD)
    }
}
