//! Access tokens
//!
//! HS256 JWTs carrying the username. Expiry is checked with zero leeway.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum symmetric key length in bytes
pub const MIN_SECRET_KEY_SIZE: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid key size: must be at least {MIN_SECRET_KEY_SIZE} characters")]
    InvalidKeySize,

    #[error("token has expired")]
    ExpiredToken,

    #[error("token is invalid")]
    InvalidToken,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Token payload, serialized as the JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(rename = "jti")]
    pub id: Uuid,
    #[serde(rename = "sub")]
    pub username: String,
    /// Unix seconds
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Unix seconds
    #[serde(rename = "exp")]
    pub expired_at: i64,
}

impl Payload {
    pub fn new(username: impl Into<String>, duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            issued_at: now.timestamp(),
            expired_at: (now + duration).timestamp(),
        }
    }
}

/// Issues and verifies access tokens with one symmetric key
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtMaker {
    pub fn new(secret_key: &str) -> Result<Self, TokenError> {
        if secret_key.len() < MIN_SECRET_KEY_SIZE {
            return Err(TokenError::InvalidKeySize);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            validation,
        })
    }

    pub fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, duration);
        let token = encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        Ok((token, payload))
    }

    pub fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        decode::<Payload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                _ => TokenError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::random::RandomGenerator;

    fn maker(rg: &mut RandomGenerator) -> JwtMaker {
        JwtMaker::new(&rg.random_string(32)).unwrap()
    }

    #[test]
    fn test_create_and_verify_token() {
        let mut rg = RandomGenerator::new();
        let maker = maker(&mut rg);
        let username = rg.random_owner();
        let duration = Duration::minutes(1);

        let (token, issued) = maker.create_token(&username, duration).unwrap();
        assert!(!token.is_empty());

        let payload = maker.verify_token(&token).unwrap();
        assert_eq!(payload, issued);
        assert_eq!(payload.username, username);
        assert!((payload.issued_at - Utc::now().timestamp()).abs() <= 1);
        assert_eq!(payload.expired_at - payload.issued_at, 60);
    }

    #[test]
    fn test_expired_token() {
        let mut rg = RandomGenerator::new();
        let maker = maker(&mut rg);

        let (token, _) = maker
            .create_token(&rg.random_owner(), -Duration::minutes(1))
            .unwrap();
        assert_eq!(maker.verify_token(&token), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn test_alg_none_token_is_invalid() {
        let mut rg = RandomGenerator::new();
        let maker = maker(&mut rg);
        let (token, _) = maker
            .create_token(&rg.random_owner(), Duration::minutes(1))
            .unwrap();

        // {"alg":"none","typ":"JWT"} with the original claims and no signature
        let claims = token.split('.').nth(1).unwrap();
        let unsigned = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{claims}.");
        assert_eq!(maker.verify_token(&unsigned), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_token_from_other_key_is_invalid() {
        let mut rg = RandomGenerator::new();
        let issuer = maker(&mut rg);
        let verifier = maker(&mut rg);

        let (token, _) = issuer.create_token("alice", Duration::minutes(1)).unwrap();
        assert_eq!(verifier.verify_token(&token), Err(TokenError::InvalidToken));
        assert_eq!(
            verifier.verify_token("not-a-jwt"),
            Err(TokenError::InvalidToken)
        );
    }

    #[test]
    fn test_short_key_is_rejected() {
        assert!(matches!(
            JwtMaker::new("too-short"),
            Err(TokenError::InvalidKeySize)
        ));
        assert!(JwtMaker::new(&"k".repeat(MIN_SECRET_KEY_SIZE)).is_ok());
    }
}
