//! JWT utilities for authentication
//!
//! Tokens are issued by the identity provider; this service validates them
//! and turns their claims into an [`Operator`]. Issuing is kept for tooling
//! and tests that need a signed token.

use chrono::{Duration, Utc};
use gym_core::{Operator, Role};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (trainer, member or admin id)
    pub sub: String,
    /// Role the subject acts as
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build the operator identity carried by the token
    ///
    /// # Errors
    /// Returns an error if the subject is not a positive integer id
    pub fn operator(&self) -> Result<Operator, AppError> {
        self.sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(|id| Operator::new(id, self.role))
            .ok_or(AppError::InvalidToken)
    }
}

/// Signed access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Sign an access token for an operator
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, operator: Operator) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: operator.id.to_string(),
            role: operator.role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate an access token and return the operator it identifies
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or names no valid subject
    pub fn authenticate(&self, token: &str) -> Result<Operator, AppError> {
        self.decode_token(token)?.operator()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}
