// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Records persisted by the storage layer and the request payloads accepted
//! by the REST API. All API-facing types derive `ToSchema` for the OpenAPI
//! document.
//!
//! ## Model Categories
//!
//! - **Accounts**: identity records keyed by CPF
//! - **Transfers**: immutable money-movement records
//! - **Requests**: inbound transfer payloads, validated with `validator`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Maximum length of a transfer description.
pub const DESCRIPTION_MAX_LEN: usize = 140;

// =============================================================================
// Accounts
// =============================================================================

/// A bank account.
///
/// The CPF is unique across accounts and is the identity carried by tokens.
/// Transfers are associated through their `account_origin_id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Account {
    pub id: u64,
    pub name: String,
    pub cpf: String,
    pub created_at: DateTime<Utc>,
}

/// Values needed to insert an account; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub cpf: String,
}

// =============================================================================
// Transfers
// =============================================================================

/// A persisted transfer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Transfer {
    pub id: u64,
    /// Account that sent the money (always the authenticated caller).
    pub account_origin_id: u64,
    /// Account receiving the money.
    pub destination: u64,
    #[schema(example = 50.0)]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Inbound payload for `POST /transfers`.
///
/// `account_origin_id` is never read from the body: it is assigned from the
/// authenticated account before validation runs.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct TransferRequest {
    #[serde(skip_deserializing)]
    #[schema(read_only)]
    #[validate(range(min = 1))]
    pub account_origin_id: u64,

    #[schema(example = 2)]
    #[validate(required, range(min = 1))]
    pub destination: Option<u64>,

    #[schema(example = 50.0)]
    #[validate(required, range(exclusive_min = 0.0))]
    pub amount: Option<f64>,

    #[validate(length(max = 140))]
    pub description: Option<String>,
}

/// A validated transfer ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransfer {
    pub account_origin_id: u64,
    pub destination: u64,
    pub amount: f64,
    pub description: Option<String>,
}

impl TransferRequest {
    /// Overwrite the origin with the authenticated account.
    pub fn assign_origin(&mut self, account_id: u64) {
        self.account_origin_id = account_id;
    }

    /// Convert into an insertable record.
    ///
    /// Returns `None` while required fields are missing; call after a
    /// successful [`Validate::validate`].
    pub fn into_new_transfer(self) -> Option<NewTransfer> {
        Some(NewTransfer {
            account_origin_id: self.account_origin_id,
            destination: self.destination?,
            amount: self.amount?,
            description: self.description,
        })
    }
}
