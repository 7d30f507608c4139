//! HTTP handlers
//!
//! - [`account`]: create and read accounts (public)
//! - [`transfer`]: create and read transfers (bearer token)
//! - [`health`]: liveness

pub mod account;
pub mod health;
pub mod transfer;

pub use account::{create_account, get_account};
pub use health::{HealthResponse, health_check};
pub use transfer::{create_transfer, get_transfer};
