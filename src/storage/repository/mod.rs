// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the bank database.
//!
//! Each repository borrows the [`BankDatabase`](super::BankDatabase) and runs
//! every operation in its own redb transaction.

pub mod accounts;
pub mod transfers;

pub use accounts::AccountRepository;
pub use transfers::TransferRepository;
