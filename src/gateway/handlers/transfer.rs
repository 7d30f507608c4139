//! Transfer handlers

use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, CreateTransferRequest, ValidatedJson, ok};
use crate::auth::Payload;
use crate::ledger::Transfer;
use crate::transfer::{TransferRequest, TransferTxResult};

/// Create transfer endpoint
///
/// POST /transfers
#[utoipa::path(
    post,
    path = "/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 200, description = "Transfer committed", body = TransferTxResult, content_type = "application/json"),
        (status = 400, description = "Invalid parameters or currency mismatch"),
        (status = 401, description = "Missing/invalid token or caller does not own the from account"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Transaction conflict, safe to retry"),
        (status = 422, description = "Insufficient funds")
    ),
    security(("bearer_auth" = [])),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Extension(payload): Extension<Payload>,
    ValidatedJson(req): ValidatedJson<CreateTransferRequest>,
) -> ApiResult<TransferTxResult> {
    let req = TransferRequest::from(req);
    let result = state
        .coordinator
        .transfer(&payload.username, &req)
        .await
        .map_err(ApiError::from)?;
    ok(result)
}

/// Get transfer endpoint
///
/// GET /transfers/{id}
#[utoipa::path(
    get,
    path = "/transfers/{id}",
    params(
        ("id" = i64, Path, description = "Transfer ID (>= 1)")
    ),
    responses(
        (status = 200, description = "Transfer record", body = Transfer, content_type = "application/json"),
        (status = 400, description = "Invalid transfer ID"),
        (status = 401, description = "Caller owns neither side of the transfer"),
        (status = 404, description = "Transfer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Transfer"
)]
pub async fn get_transfer(
    State(state): State<Arc<AppState>>,
    Extension(payload): Extension<Payload>,
    Path(id): Path<i64>,
) -> ApiResult<Transfer> {
    if id < 1 {
        return ApiError::bad_request("Transfer ID must be >= 1").into_err();
    }

    let transfer = state
        .coordinator
        .get_transfer(&payload.username, id)
        .await
        .map_err(ApiError::from)?;
    ok(transfer)
}
