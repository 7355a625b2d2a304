// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transfer repository.
//!
//! Creating a transfer is a pure insert: no balance is read or adjusted.
//! The origin must reference an existing account; the destination is stored
//! as given.

use chrono::Utc;
use redb::ReadableTable;

use super::super::database::{
    next_id, origin_index_key, BankDatabase, StoreError, StoreResult, ACCOUNTS,
    ORIGIN_TRANSFER_INDEX, TRANSFERS, TRANSFER_SEQUENCE,
};
use crate::models::{NewTransfer, Transfer};

/// Repository for transfer operations.
pub struct TransferRepository<'a> {
    db: &'a BankDatabase,
}

impl<'a> TransferRepository<'a> {
    /// Create a new TransferRepository.
    pub fn new(db: &'a BankDatabase) -> Self {
        Self { db }
    }

    /// Persist a transfer and return it with its assigned id.
    pub fn create(&self, new_transfer: NewTransfer) -> StoreResult<Transfer> {
        let write_txn = self.db.begin_write()?;

        let origin_exists = {
            let accounts = write_txn.open_table(ACCOUNTS)?;
            let exists = accounts.get(new_transfer.account_origin_id)?.is_some();
            exists
        };
        if !origin_exists {
            return Err(StoreError::NotFound(format!(
                "Account {}",
                new_transfer.account_origin_id
            )));
        }

        let transfer = Transfer {
            id: next_id(&write_txn, TRANSFER_SEQUENCE)?,
            account_origin_id: new_transfer.account_origin_id,
            destination: new_transfer.destination,
            amount: new_transfer.amount,
            description: new_transfer.description,
            created_at: Utc::now(),
        };
        let json = serde_json::to_vec(&transfer)?;

        {
            let mut table = write_txn.open_table(TRANSFERS)?;
            table.insert(transfer.id, json.as_slice())?;

            let mut index = write_txn.open_table(ORIGIN_TRANSFER_INDEX)?;
            let key = origin_index_key(transfer.account_origin_id, transfer.id);
            index.insert(key.as_slice(), transfer.id)?;
        }
        write_txn.commit()?;

        Ok(transfer)
    }

    /// Get a transfer by id.
    pub fn get(&self, transfer_id: u64) -> StoreResult<Transfer> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TRANSFERS)?;
        let value = table
            .get(transfer_id)?
            .ok_or_else(|| StoreError::NotFound(format!("Transfer {transfer_id}")))?;
        Ok(serde_json::from_slice(value.value())?)
    }

    /// All transfers whose origin is `account_id`, oldest first.
    pub fn list_by_origin(&self, account_id: u64) -> StoreResult<Vec<Transfer>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(ORIGIN_TRANSFER_INDEX)?;
        let table = read_txn.open_table(TRANSFERS)?;

        let start = origin_index_key(account_id, 0);
        let end = origin_index_key(account_id, u64::MAX);

        let mut transfers = Vec::new();
        for entry in index.range(start.as_slice()..=end.as_slice())? {
            let (_, transfer_id) = entry?;
            let transfer_id = transfer_id.value();
            match table.get(transfer_id)? {
                Some(value) => transfers.push(serde_json::from_slice(value.value())?),
                None => {
                    tracing::warn!(transfer_id, account_id, "index entry without transfer row");
                }
            }
        }

        Ok(transfers)
    }
}
