// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::storage::BankDatabase;

/// Application context handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<BankDatabase>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(db: BankDatabase, verifier: TokenVerifier) -> Self {
        Self {
            db: Arc::new(db),
            verifier: Arc::new(verifier),
        }
    }
}
