// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Banking - transfer API for token-authenticated accounts
//!
//! Callers present a signed token in the `Token` header; the CPF it carries
//! selects the account whose transfers are listed or created.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token verification and the `Auth` extractor
//! - `storage` - Accounts and transfers (redb)
//! - `validation` - Translated validation messages

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod state;
pub mod storage;
pub mod validation;
