// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for accounts and transfers using **redb**, an embedded
//! ACID key-value store. The tables model a small relational schema:
//!
//! ```text
//! accounts(id PK, name, cpf UNIQUE, created_at)
//! transfers(id PK, account_origin_id FK -> accounts.id, destination,
//!           amount, description, created_at)
//! ```
//!
//! Uniqueness and the foreign key are checked inside the same write
//! transaction as the insert.

pub mod database;
pub mod repository;

pub use database::{BankDatabase, StoreError, StoreResult};
pub use repository::{AccountRepository, TransferRepository};
