// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims.

use serde::{Deserialize, Serialize};

/// Claims carried by an account token.
///
/// Lives for the duration of one request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// CPF of the account the token was issued to
    pub cpf: String,

    /// Expiration timestamp (unix seconds)
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Claims for `cpf` expiring `ttl` from now.
    pub fn new(cpf: impl Into<String>, ttl: chrono::Duration) -> Self {
        let now = chrono::Utc::now();
        Self {
            cpf: cpf.into(),
            exp: (now + ttl).timestamp(),
            iat: Some(now.timestamp()),
        }
    }
}
