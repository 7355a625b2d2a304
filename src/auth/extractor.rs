// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated requests.
//!
//! Use the `Auth` extractor in handlers to require a valid token:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(claims): Auth) -> impl IntoResponse {
//!     // claims.cpf identifies the caller
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, Claims};
use crate::state::AppState;

/// Header carrying the raw token (no `Bearer` prefix).
pub const TOKEN_HEADER: &str = "token";

/// Extractor for verified token claims.
///
/// Rejects with [`AuthError`] when the `Token` header is missing or the
/// token fails verification. Runs before any body extractor, so a request
/// without a token is refused regardless of its method or body.
pub struct Auth(pub Claims);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::MalformedToken)?;

        let claims = state.verifier.verify(token).inspect_err(|e| {
            tracing::debug!(error_code = e.error_code(), "token rejected");
        })?;

        Ok(Auth(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verifier::test_support::{expired_token_for, token_for};
    use crate::state::test_support::test_state;
    use axum::http::{HeaderValue, Request};

    fn parts_with_token(token: Option<HeaderValue>) -> Parts {
        let mut builder = Request::builder().uri("/transfers");
        if let Some(token) = token {
            builder = builder.header("Token", token);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_token_header() {
        let (state, _dir) = test_state();
        let mut parts = parts_with_token(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn auth_extractor_ignores_authorization_header() {
        let (state, _dir) = test_state();
        let mut parts = Request::builder()
            .uri("/transfers")
            .header("Authorization", format!("Bearer {}", token_for("111")))
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_valid_token() {
        let (state, _dir) = test_state();
        let token = HeaderValue::from_str(&token_for("111")).unwrap();
        let mut parts = parts_with_token(Some(token));

        let Auth(claims) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(claims.cpf, "111");
    }

    #[tokio::test]
    async fn auth_extractor_rejects_expired_token() {
        let (state, _dir) = test_state();
        let token = HeaderValue::from_str(&expired_token_for("111")).unwrap();
        let mut parts = parts_with_token(Some(token));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn non_ascii_header_is_malformed() {
        let (state, _dir) = test_state();
        let token = HeaderValue::from_bytes(b"tok\xe9n").unwrap();
        let mut parts = parts_with_token(Some(token));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MalformedToken)));
    }
}
