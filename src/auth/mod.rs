// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Token authentication for the banking API.
//!
//! ## Auth Flow
//!
//! 1. Client sends `Token: <jwt>` (no `Bearer` prefix)
//! 2. Server:
//!    - Verifies the HS256 signature with `TOKEN_KEY`
//!    - Decodes the claims and checks expiry
//!    - Extracts `cpf` → identity used to look up the account
//!
//! ## Failures
//!
//! | Case | Status | Message |
//! |------|--------|---------|
//! | header missing | 401 | `Token nulo` |
//! | bad signature | 401 | `Assinatura inválida` |
//! | malformed | 401 | `Token inválido` |
//! | expired | 401 | `Token Expirou` |

pub mod claims;
pub mod error;
pub mod extractor;
pub mod verifier;

pub use claims::Claims;
pub use error::AuthError;
pub use extractor::{Auth, TOKEN_HEADER};
pub use verifier::TokenVerifier;
