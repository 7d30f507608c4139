//! Account handlers

use std::sync::Arc;

use axum::extract::{Path, State};

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, CreateAccountRequest, ValidatedJson, error_codes, ok,
};
use crate::ledger::{Account, CreateAccountParams, StoreError};

/// Create account endpoint
///
/// POST /accounts
#[utoipa::path(
    post,
    path = "/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created", body = Account, content_type = "application/json"),
        (status = 400, description = "Invalid owner or unsupported currency"),
        (status = 500, description = "Internal error")
    ),
    tag = "Account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateAccountRequest>,
) -> ApiResult<Account> {
    let account = state
        .store
        .create_account(CreateAccountParams {
            owner: req.owner,
            balance: 0,
            currency: req.currency,
        })
        .await?;

    tracing::info!(
        account_id = account.id,
        owner = %account.owner,
        currency = %account.currency,
        "Account created"
    );
    ok(account)
}

/// Get account endpoint
///
/// GET /accounts/{id}
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    params(
        ("id" = i64, Path, description = "Account ID (>= 1)")
    ),
    responses(
        (status = 200, description = "Account details", body = Account, content_type = "application/json"),
        (status = 400, description = "Invalid account ID"),
        (status = 404, description = "Account not found")
    ),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Account> {
    if id < 1 {
        return ApiError::bad_request("Account ID must be >= 1").into_err();
    }

    match state.store.get_account(id).await {
        Ok(account) => ok(account),
        Err(StoreError::NotFound) => ApiError::not_found(
            error_codes::ACCOUNT_NOT_FOUND,
            format!("Account not found: {id}"),
        )
        .into_err(),
        Err(e) => Err(e.into()),
    }
}
