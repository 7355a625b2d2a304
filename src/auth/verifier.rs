// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token verification with the server-held symmetric key.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::{AuthError, Claims};

/// Verifies account tokens.
///
/// Signature is checked before the claims are decoded, then `exp` is
/// compared with the current time (minus the configured leeway).
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for `secret` with `leeway_secs` of expiry tolerance.
    pub fn new(secret: &[u8], leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify `token` and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::Claims;

    pub const TEST_SECRET: &[u8] = b"test-signing-key";

    /// Sign `claims` with `secret` (HS256).
    pub fn sign(claims: &Claims, secret: &[u8]) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
            .expect("token encodes")
    }

    /// Valid token for `cpf`, signed with [`TEST_SECRET`].
    pub fn token_for(cpf: &str) -> String {
        sign(&Claims::new(cpf, chrono::Duration::hours(1)), TEST_SECRET)
    }

    /// Token for `cpf` that expired an hour ago.
    pub fn expired_token_for(cpf: &str) -> String {
        sign(&Claims::new(cpf, chrono::Duration::hours(-1)), TEST_SECRET)
    }
}
