// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use relational_banking::{
    config::{AppConfig, LOG_FORMAT_ENV},
    logging::{init_logging, LogFormat},
    server,
};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // No config yet; honour LOG_FORMAT alone.
            let format = std::env::var(LOG_FORMAT_ENV).unwrap_or_default();
            init_logging(LogFormat::from_str_lossy(&format));
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    init_logging(config.log_format);

    if let Err(e) = server::run(config).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
