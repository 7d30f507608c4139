//! Money transfer
//!
//! A transfer moves `amount` minor units between two accounts of the same
//! currency as one atomic unit on the ledger store: one transfer record, two
//! entries (`-amount` / `+amount`) and two balance increments.
//!
//! # Safety Invariants
//!
//! 1. **All or nothing**: any failure before commit rolls the whole unit back
//! 2. **Ascending lock order**: balance rows are updated lower id first
//! 3. **Checks before writes**: existence, currency and ownership are verified
//!    before a unit is opened
//! 4. **No overdraft** unless the policy allows it; checked under the row lock

pub mod coordinator;
pub mod error;
pub mod types;
pub mod validation;


pub use coordinator::TransferCoordinator;
pub use error::TransferError;
pub use types::{TransferPolicy, TransferRequest, TransferTxParams, TransferTxResult};
