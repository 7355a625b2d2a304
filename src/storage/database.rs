// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded bank database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `accounts`: account id → serialized Account
//! - `account_cpf_index`: cpf → account id (unique)
//! - `transfers`: transfer id → serialized Transfer
//! - `origin_transfer_index`: composite key (origin_id|transfer_id) → transfer id
//! - `sequences`: sequence name → last assigned id

use std::path::Path;

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: account id → serialized Account (JSON bytes).
pub(super) const ACCOUNTS: TableDefinition<u64, &[u8]> = TableDefinition::new("accounts");

/// Unique index: cpf → account id.
pub(super) const ACCOUNT_CPF_INDEX: TableDefinition<&str, u64> =
    TableDefinition::new("account_cpf_index");

/// Primary table: transfer id → serialized Transfer (JSON bytes).
pub(super) const TRANSFERS: TableDefinition<u64, &[u8]> = TableDefinition::new("transfers");

/// Index: `origin_be | transfer_id_be` → transfer id, for per-account scans.
pub(super) const ORIGIN_TRANSFER_INDEX: TableDefinition<&[u8], u64> =
    TableDefinition::new("origin_transfer_index");

/// Sequences: name → last assigned id.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

pub(super) const ACCOUNT_SEQUENCE: &str = "accounts";
pub(super) const TRANSFER_SEQUENCE: &str = "transfers";

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Composite key for `origin_transfer_index`.
///
/// Big-endian encoding keeps one account's transfers contiguous and ordered
/// by transfer id (creation order).
pub(super) fn origin_index_key(origin_id: u64, transfer_id: u64) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&origin_id.to_be_bytes());
    key[8..].copy_from_slice(&transfer_id.to_be_bytes());
    key
}

// =============================================================================
// BankDatabase
// =============================================================================

/// Handle to the embedded database. Safe to share across requests.
pub struct BankDatabase {
    db: Database,
}

impl BankDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ACCOUNTS)?;
            let _ = write_txn.open_table(ACCOUNT_CPF_INDEX)?;
            let _ = write_txn.open_table(TRANSFERS)?;
            let _ = write_txn.open_table(ORIGIN_TRANSFER_INDEX)?;
            let _ = write_txn.open_table(SEQUENCES)?;
        }
        write_txn.commit()?;

        tracing::info!(path = %path.display(), "bank database opened");
        Ok(Self { db })
    }

    /// Verify the database answers a read transaction.
    pub fn ping(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(ACCOUNTS)?;
        Ok(())
    }

    pub(super) fn begin_read(&self) -> StoreResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    pub(super) fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }
}

/// Advance a sequence inside `txn` and return the new id (first id is 1).
pub(super) fn next_id(txn: &WriteTransaction, sequence: &str) -> StoreResult<u64> {
    let mut table = txn.open_table(SEQUENCES)?;
    let current = table.get(sequence)?.map(|v| v.value()).unwrap_or(0);
    let next = current + 1;
    table.insert(sequence, next)?;
    Ok(next)
}
