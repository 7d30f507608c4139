//! Authentication
//!
//! - [`token`]: access token issuing and verification
//! - [`middleware`]: Axum layer that turns a bearer token into the acting owner

pub mod middleware;
pub mod token;

pub use middleware::jwt_auth_middleware;
pub use token::{JwtMaker, Payload, TokenError};
