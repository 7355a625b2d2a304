// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AppConfig`] loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `TOKEN_KEY` | Symmetric key used to verify `Token` signatures (HS256) | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory holding the database file | `./data` |
//! | `TOKEN_LEEWAY_SECS` | Clock skew tolerated on token expiry | `0` |
//! | `TLS_CERT_PATH` | PEM certificate chain (enables HTTPS with `TLS_KEY_PATH`) | Optional |
//! | `TLS_KEY_PATH` | PEM private key | Optional |
//! | `SEED_ACCOUNTS` | Accounts created at boot, `cpf:name,cpf:name` | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Environment variable name for the token signing key.
pub const TOKEN_KEY_ENV: &str = "TOKEN_KEY";

/// Environment variable name for the bind host.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the data directory path.
///
/// The database file [`DATABASE_FILE`] is created inside this directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the token expiry leeway (seconds).
pub const TOKEN_LEEWAY_ENV: &str = "TOKEN_LEEWAY_SECS";

/// Environment variable names for the TLS certificate and key.
pub const TLS_CERT_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_ENV: &str = "TLS_KEY_PATH";

/// Environment variable name for accounts seeded at startup.
pub const SEED_ACCOUNTS_ENV: &str = "SEED_ACCOUNTS";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default `EnvFilter` directives when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// File name of the embedded database inside `DATA_DIR`.
pub const DATABASE_FILE: &str = "bank.redb";

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    PartialTls,
}

/// PEM files for HTTPS serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Account created at startup when it does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    pub cpf: String,
    pub name: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub token_key: String,
    pub token_leeway_secs: u64,
    pub tls: Option<TlsPaths>,
    pub seed_accounts: Vec<SeedAccount>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Load configuration from an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &'static str| lookup(&vars, name);

        let token_key = get(TOKEN_KEY_ENV)
            .ok_or(ConfigError::Missing(TOKEN_KEY_ENV))?
            .to_string();

        let host = get(HOST_ENV).unwrap_or(DEFAULT_HOST);
        let port = match get(PORT_ENV) {
            Some(raw) => parse_var(PORT_ENV, raw)?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::Invalid {
                var: HOST_ENV,
                value: host.to_string(),
            })?;

        let token_leeway_secs = match get(TOKEN_LEEWAY_ENV) {
            Some(raw) => parse_var(TOKEN_LEEWAY_ENV, raw)?,
            None => 0,
        };

        let tls = match (get(TLS_CERT_ENV), get(TLS_KEY_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialTls),
        };

        let seed_accounts = match get(SEED_ACCOUNTS_ENV) {
            Some(raw) => parse_seed_accounts(raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            bind_addr,
            data_dir: PathBuf::from(get(DATA_DIR_ENV).unwrap_or(DEFAULT_DATA_DIR)),
            token_key,
            token_leeway_secs,
            tls,
            seed_accounts,
            log_format: get(LOG_FORMAT_ENV)
                .map(LogFormat::from_str_lossy)
                .unwrap_or(LogFormat::Pretty),
        })
    }

    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

/// Non-empty, trimmed value of `name`.
fn lookup<'a>(vars: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        var,
        value: raw.to_string(),
    })
}

/// Parse `cpf:name,cpf:name`. The name may be omitted (`cpf`).
fn parse_seed_accounts(raw: &str) -> Result<Vec<SeedAccount>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (cpf, name) = entry.split_once(':').unwrap_or((entry, ""));
            let cpf = cpf.trim();
            if cpf.is_empty() {
                return Err(ConfigError::Invalid {
                    var: SEED_ACCOUNTS_ENV,
                    value: entry.to_string(),
                });
            }
            Ok(SeedAccount {
                cpf: cpf.to_string(),
                name: name.trim().to_string(),
            })
        })
        .collect()
}
