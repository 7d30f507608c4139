//! Gateway types module
//!
//! ## Input Types
//! - [`CreateAccountRequest`], [`CreateTransferRequest`]: request bodies
//! - [`ValidatedJson`]: Axum extractor that rejects invalid bodies with 400
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`ApiError`]: Error envelope with HTTP status
//!
//! ## Submodules
//! - [`request`]: Request types and validation
//! - [`response`]: Response types and error codes

pub mod request;
pub mod response;

pub use request::{CreateAccountRequest, CreateTransferRequest, ValidatedJson};
pub use response::{ApiError, ApiResponse, ApiResult, error_codes, ok};
