// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transfer endpoints.
//!
//! Both handlers authenticate through the [`Auth`] extractor, then resolve
//! the caller's account by CPF. Creation decodes the raw body only after the
//! account is known, overwrites the origin, validates, and inserts.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    auth::{Auth, Claims},
    error::ApiError,
    models::{Account, Transfer, TransferRequest},
    state::AppState,
    storage::{AccountRepository, TransferRepository},
    validation::translate_errors,
};

const LIST_FAILED: &str = "Erro na listagem das transferências";
const CREATE_FAILED: &str = "Erro na criação da transferência";
const INVALID_JSON: &str = "Formato JSON inválido";
const INVALID_TRANSFER: &str = "Transferência inválida";

/// Resolve the authenticated account. Not-found and storage errors both
/// answer 500 with `message`.
fn lookup_account(state: &AppState, claims: &Claims, message: &'static str) -> Result<Account, ApiError> {
    AccountRepository::new(&state.db)
        .find_by_cpf(&claims.cpf)
        .map_err(|e| {
            if e.is_not_found() {
                tracing::warn!("no account matches the token identity");
            } else {
                tracing::error!(error = %e, "account lookup failed");
            }
            ApiError::internal(message)
        })
}

#[utoipa::path(
    get,
    path = "/transfers",
    tag = "Transfers",
    security(("token" = [])),
    responses(
        (status = 200, description = "Transfers sent by the caller", body = [Transfer]),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 500, description = "Account lookup or query failed")
    )
)]
pub async fn list_transfers(
    State(state): State<AppState>,
    Auth(claims): Auth,
) -> Result<Json<Vec<Transfer>>, ApiError> {
    let account = lookup_account(&state, &claims, LIST_FAILED)?;

    let transfers = TransferRepository::new(&state.db)
        .list_by_origin(account.id)
        .map_err(|e| {
            tracing::error!(error = %e, account_id = account.id, "failed to list transfers");
            ApiError::internal(LIST_FAILED)
        })?;

    Ok(Json(transfers))
}

#[utoipa::path(
    post,
    path = "/transfers",
    tag = "Transfers",
    security(("token" = [])),
    request_body = TransferRequest,
    responses(
        (status = 201, description = "Transfer created", body = Transfer),
        (status = 400, description = "Malformed JSON or validation failure"),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 500, description = "Account lookup or insert failed")
    )
)]
pub async fn create_transfer(
    State(state): State<AppState>,
    Auth(claims): Auth,
    body: Bytes,
) -> Result<(StatusCode, Json<Transfer>), ApiError> {
    let account = lookup_account(&state, &claims, CREATE_FAILED)?;

    let mut request: TransferRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "transfer body rejected");
        ApiError::bad_request(INVALID_JSON)
    })?;

    request.assign_origin(account.id);

    request
        .validate()
        .map_err(|errors| ApiError::validation(INVALID_TRANSFER, translate_errors(&errors)))?;

    let new_transfer = request
        .into_new_transfer()
        .ok_or_else(|| ApiError::bad_request(INVALID_TRANSFER))?;

    let transfer = TransferRepository::new(&state.db)
        .create(new_transfer)
        .map_err(|e| {
            tracing::error!(error = %e, account_id = account.id, "failed to create transfer");
            ApiError::internal(CREATE_FAILED)
        })?;

    tracing::info!(
        transfer_id = transfer.id,
        account_origin_id = transfer.account_origin_id,
        destination = transfer.destination,
        "transfer created"
    );

    Ok((StatusCode::CREATED, Json(transfer)))
}
