// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Token verification failure.
///
/// Every variant answers 401 with a single status; malformed and expired
/// tokens do not get a second status write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Token` header present
    MissingToken,
    /// Token signature does not match the configured key
    InvalidSignature,
    /// Token could not be parsed or decoded
    MalformedToken,
    /// Token expiry is in the past
    TokenExpired,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::MalformedToken => "malformed_token",
            AuthError::TokenExpired => "token_expired",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Token nulo"),
            AuthError::InvalidSignature => write!(f, "Assinatura inválida"),
            AuthError::MalformedToken => write!(f, "Token inválido"),
            AuthError::TokenExpired => write!(f, "Token Expirou"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::MalformedToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_token_returns_401() {
        let response = AuthError::MissingToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Token nulo");
        assert_eq!(body["error_code"], "missing_token");
    }

    #[test]
    fn every_variant_is_unauthorized() {
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidSignature,
            AuthError::MalformedToken,
            AuthError::TokenExpired,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn jsonwebtoken_errors_are_classified() {
        use jsonwebtoken::errors::{Error, ErrorKind};

        assert_eq!(
            AuthError::from(Error::from(ErrorKind::InvalidSignature)),
            AuthError::InvalidSignature
        );
        assert_eq!(
            AuthError::from(Error::from(ErrorKind::ExpiredSignature)),
            AuthError::TokenExpired
        );
        assert_eq!(
            AuthError::from(Error::from(ErrorKind::InvalidToken)),
            AuthError::MalformedToken
        );
    }
}
