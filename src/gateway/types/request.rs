//! Request DTOs and the validating JSON extractor

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use utoipa::ToSchema;
use validator::Validate;

use super::response::ApiError;
use crate::ledger::Currency;
use crate::transfer::TransferRequest;

/// Create account request. New accounts start with a zero balance.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[schema(example = "alice")]
    #[validate(length(min = 1, max = 64))]
    pub owner: String,
    #[schema(example = "USD")]
    pub currency: Currency,
}

/// Transfer request. The caller must own `from_account_id`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTransferRequest {
    #[schema(example = 1)]
    #[validate(range(min = 1))]
    pub from_account_id: i64,
    #[schema(example = 2)]
    #[validate(range(min = 1))]
    pub to_account_id: i64,
    /// Minor currency units
    #[schema(example = 1000)]
    #[validate(range(min = 1))]
    pub amount: i64,
    #[schema(example = "USD")]
    pub currency: Currency,
}

impl From<CreateTransferRequest> for TransferRequest {
    fn from(req: CreateTransferRequest) -> Self {
        TransferRequest::new(
            req.from_account_id,
            req.to_account_id,
            req.amount,
            req.currency,
        )
    }
}

/// JSON body that has passed its `Validate` rules.
///
/// Malformed JSON and rule violations are both rejected with 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;

        value
            .validate()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_request_rules() {
        let ok: CreateTransferRequest = serde_json::from_str(
            r#"{"from_account_id":1,"to_account_id":2,"amount":10,"currency":"USD"}"#,
        )
        .unwrap();
        assert!(ok.validate().is_ok());

        let zero: CreateTransferRequest = serde_json::from_str(
            r#"{"from_account_id":1,"to_account_id":2,"amount":0,"currency":"USD"}"#,
        )
        .unwrap();
        assert!(zero.validate().is_err());

        let bad_id: CreateTransferRequest = serde_json::from_str(
            r#"{"from_account_id":0,"to_account_id":2,"amount":5,"currency":"EUR"}"#,
        )
        .unwrap();
        assert!(bad_id.validate().is_err());
    }

    #[test]
    fn test_unsupported_currency_fails_to_parse() {
        let parsed = serde_json::from_str::<CreateAccountRequest>(
            r#"{"owner":"alice","currency":"GBP"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_owner_rejected() {
        let req: CreateAccountRequest =
            serde_json::from_str(r#"{"owner":"","currency":"CAD"}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
