// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Process wiring: open storage, seed accounts, serve HTTP(S) until a
//! shutdown signal arrives.

use std::time::Duration;

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio::signal;

use crate::{
    api::router,
    auth::TokenVerifier,
    config::{AppConfig, SeedAccount, TlsPaths},
    models::NewAccount,
    state::AppState,
    storage::{AccountRepository, BankDatabase, StoreError},
};

/// Time given to in-flight requests once shutdown starts.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to open database: {0}")]
    Database(#[from] StoreError),

    #[error("failed to seed account: {0}")]
    Seed(StoreError),

    #[error("failed to install rustls crypto provider")]
    CryptoProvider,

    #[error("failed to load TLS certificate: {0}")]
    Tls(std::io::Error),

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Insert configured accounts. CPFs that already exist are left alone.
pub fn seed_accounts(db: &BankDatabase, seeds: &[SeedAccount]) -> Result<usize, ServerError> {
    let repo = AccountRepository::new(db);
    let mut created = 0;

    for seed in seeds {
        match repo.create(NewAccount {
            name: seed.name.clone(),
            cpf: seed.cpf.clone(),
        }) {
            Ok(account) => {
                tracing::info!(account_id = account.id, "seeded account");
                created += 1;
            }
            Err(StoreError::AlreadyExists(_)) => {
                tracing::debug!("seed account already present");
            }
            Err(e) => return Err(ServerError::Seed(e)),
        }
    }

    Ok(created)
}

/// Run the server until Ctrl-C or SIGTERM.
pub async fn run(config: AppConfig) -> Result<(), ServerError> {
    let db_path = config.database_path();
    let db = BankDatabase::open(&db_path)?;
    tracing::info!(path = %db_path.display(), "database ready");

    let seeded = seed_accounts(&db, &config.seed_accounts)?;
    if seeded > 0 {
        tracing::info!(count = seeded, "seed accounts created");
    }

    let verifier = TokenVerifier::new(config.token_key.as_bytes(), config.token_leeway_secs);
    let app = router(AppState::new(db, verifier));

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("shutdown signal received, draining connections");
        shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });

    let addr = config.bind_addr;
    match config.tls {
        Some(tls) => {
            let tls_config = load_tls(&tls).await?;
            tracing::info!(%addr, "banking server listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(ServerError::Serve)?;
        }
        None => {
            tracing::info!(%addr, "banking server listening on http (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(ServerError::Serve)?;
        }
    }

    tracing::info!("server stopped");
    Ok(())
}

async fn load_tls(paths: &TlsPaths) -> Result<RustlsConfig, ServerError> {
    // Must happen before any rustls config is built.
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
        && rustls::crypto::CryptoProvider::get_default().is_none()
    {
        return Err(ServerError::CryptoProvider);
    }

    RustlsConfig::from_pem_file(&paths.cert, &paths.key)
        .await
        .map_err(ServerError::Tls)
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::test_support::temp_db;

    fn seed(cpf: &str, name: &str) -> SeedAccount {
        SeedAccount {
            cpf: cpf.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn seeding_creates_accounts_once() {
        let (db, _dir) = temp_db();
        let seeds = vec![seed("111", "Ana"), seed("222", "Bruno")];

        assert_eq!(seed_accounts(&db, &seeds).unwrap(), 2);
        assert_eq!(seed_accounts(&db, &seeds).unwrap(), 0);

        let repo = AccountRepository::new(&db);
        assert_eq!(repo.find_by_cpf("111").unwrap().name, "Ana");
        assert_eq!(repo.find_by_cpf("222").unwrap().id, 2);
    }

    #[test]
    fn seeding_nothing_is_a_no_op() {
        let (db, _dir) = temp_db();
        assert_eq!(seed_accounts(&db, &[]).unwrap(), 0);
    }
}
