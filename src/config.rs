// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once, at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `STATIC_DIR` | Directory served under `/static` | `static` |
//! | `PEER_KEY_FILE` | PEM secret key of this node | Ephemeral key |
//! | `TLS_CERT_FILE` | PEM certificate chain, enables HTTPS | - |
//! | `TLS_KEY_FILE` | PEM private key for `TLS_CERT_FILE` | - |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const STATIC_DIR_ENV: &str = "STATIC_DIR";
pub const PEER_KEY_FILE_ENV: &str = "PEER_KEY_FILE";
pub const TLS_CERT_FILE_ENV: &str = "TLS_CERT_FILE";
pub const TLS_KEY_FILE_ENV: &str = "TLS_KEY_FILE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid PORT {0:?}")]
    InvalidPort(String),
    #[error("Invalid bind address {0:?}")]
    InvalidBindAddress(String),
    #[error("Unknown LOG_FORMAT {0:?} (expected json or pretty)")]
    InvalidLogFormat(String),
    #[error("TLS_CERT_FILE and TLS_KEY_FILE must be set together")]
    IncompleteTls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub peer_key_file: Option<PathBuf>,
    pub tls: Option<TlsFiles>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let bind_addr = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(format!("{host}:{port}")))?;

        let tls = match (lookup(TLS_CERT_FILE_ENV), lookup(TLS_KEY_FILE_ENV)) {
            (Some(cert), Some(key)) => Some(TlsFiles {
                cert_file: cert.into(),
                key_file: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            static_dir: lookup(STATIC_DIR_ENV)
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            peer_key_file: lookup(PEER_KEY_FILE_ENV).map(PathBuf::from),
            tls,
            log_format,
        })
    }
}
