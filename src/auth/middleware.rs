//! Bearer token middleware for Axum.
//!
//! Verifies `Authorization: Bearer <jwt>` and stores the verified
//! [`Payload`](super::token::Payload) in the request extensions.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use super::token::TokenError;
use crate::gateway::{
    state::AppState,
    types::{ApiError, error_codes},
};

const BEARER_PREFIX: &str = "Bearer ";

pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::UNAUTHORIZED,
                error_codes::MISSING_AUTH,
                "Missing Authorization header",
            )
        })?;

    let Some(token) = auth_header.strip_prefix(BEARER_PREFIX) else {
        return Err(ApiError::unauthorized("Unsupported authorization type"));
    };

    // 2. Verify token
    match state.token_maker.verify_token(token) {
        Ok(payload) => {
            // 3. Inject acting owner
            request.extensions_mut().insert(payload);
            Ok(next.run(request).await)
        }
        Err(e) => {
            debug!(error = %e, "Rejected access token");
            let msg = match e {
                TokenError::ExpiredToken => "Token has expired",
                _ => "Invalid token",
            };
            Err(ApiError::unauthorized(msg))
        }
    }
}
