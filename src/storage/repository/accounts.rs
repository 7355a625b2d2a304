// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account repository.
//!
//! Accounts are resolved by CPF through the unique `account_cpf_index`.
//! The request path only reads accounts; inserts happen at startup seeding.

use chrono::Utc;
use redb::ReadableTable;

use super::super::database::{
    next_id, BankDatabase, StoreError, StoreResult, ACCOUNTS, ACCOUNT_CPF_INDEX,
    ACCOUNT_SEQUENCE,
};
use crate::models::{Account, NewAccount};

/// Repository for account operations.
pub struct AccountRepository<'a> {
    db: &'a BankDatabase,
}

impl<'a> AccountRepository<'a> {
    /// Create a new AccountRepository.
    pub fn new(db: &'a BankDatabase) -> Self {
        Self { db }
    }

    /// Get an account by id.
    pub fn get(&self, account_id: u64) -> StoreResult<Account> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        let value = table
            .get(account_id)?
            .ok_or_else(|| StoreError::NotFound(format!("Account {account_id}")))?;
        Ok(serde_json::from_slice(value.value())?)
    }

    /// Find the account holding `cpf`.
    pub fn find_by_cpf(&self, cpf: &str) -> StoreResult<Account> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(ACCOUNT_CPF_INDEX)?;
        let account_id = index
            .get(cpf)?
            .map(|v| v.value())
            .ok_or_else(|| StoreError::NotFound(format!("Account with CPF {cpf}")))?;

        let table = read_txn.open_table(ACCOUNTS)?;
        let value = table
            .get(account_id)?
            .ok_or_else(|| StoreError::NotFound(format!("Account {account_id}")))?;
        Ok(serde_json::from_slice(value.value())?)
    }

    /// Insert a new account. Fails with `AlreadyExists` when the CPF is taken.
    pub fn create(&self, new_account: NewAccount) -> StoreResult<Account> {
        let write_txn = self.db.begin_write()?;

        let taken = {
            let index = write_txn.open_table(ACCOUNT_CPF_INDEX)?;
            let taken = index.get(new_account.cpf.as_str())?.is_some();
            taken
        };
        if taken {
            return Err(StoreError::AlreadyExists(format!(
                "Account with CPF {}",
                new_account.cpf
            )));
        }

        let account = Account {
            id: next_id(&write_txn, ACCOUNT_SEQUENCE)?,
            name: new_account.name,
            cpf: new_account.cpf,
            created_at: Utc::now(),
        };
        let json = serde_json::to_vec(&account)?;

        {
            let mut table = write_txn.open_table(ACCOUNTS)?;
            table.insert(account.id, json.as_slice())?;

            let mut index = write_txn.open_table(ACCOUNT_CPF_INDEX)?;
            index.insert(account.cpf.as_str(), account.id)?;
        }
        write_txn.commit()?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::test_support::temp_db;

    fn new_account(cpf: &str) -> NewAccount {
        NewAccount {
            name: format!("Holder {cpf}"),
            cpf: cpf.to_string(),
        }
    }

    #[test]
    fn create_and_find_by_cpf() {
        let (db, _dir) = temp_db();
        let repo = AccountRepository::new(&db);

        let created = repo.create(new_account("111")).unwrap();
        assert_eq!(created.id, 1);

        let found = repo.find_by_cpf("111").unwrap();
        assert_eq!(found, created);
        assert_eq!(repo.get(created.id).unwrap(), created);
    }

    #[test]
    fn ids_are_assigned_sequentially() {
        let (db, _dir) = temp_db();
        let repo = AccountRepository::new(&db);

        let first = repo.create(new_account("111")).unwrap();
        let second = repo.create(new_account("222")).unwrap();
        assert_eq!((first.id, second.id), (1, 2));
    }

    #[test]
    fn duplicate_cpf_is_rejected() {
        let (db, _dir) = temp_db();
        let repo = AccountRepository::new(&db);

        repo.create(new_account("111")).unwrap();
        let err = repo.create(new_account("111")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));

        // The failed insert must not burn an id.
        assert_eq!(repo.create(new_account("222")).unwrap().id, 2);
    }

    #[test]
    fn unknown_cpf_is_not_found() {
        let (db, _dir) = temp_db();
        let repo = AccountRepository::new(&db);

        let err = repo.find_by_cpf("999").unwrap_err();
        assert!(err.is_not_found());
        assert!(repo.get(42).unwrap_err().is_not_found());
    }
}
