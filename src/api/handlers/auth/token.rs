//! HS256 bearer tokens.
//!
//! Tokens carry only the username (`sub`), issuer, audience, issued-at and
//! expiry claims.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token expiry out of range")]
    Expiry,
}

pub struct TokenSigner {
    key: EncodingKey,
    issuer: String,
    audience: String,
    ttl_minutes: i64,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &[u8], issuer: String, audience: String, ttl_minutes: i64) -> Self {
        Self {
            key: EncodingKey::from_secret(secret),
            issuer,
            audience,
            ttl_minutes,
        }
    }

    /// Sign a token for `username` that expires `ttl_minutes` from now.
    ///
    /// # Errors
    /// Returns [`TokenError::Expiry`] if the expiry overflows, or
    /// [`TokenError::Sign`] if encoding fails.
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let ttl = Duration::try_minutes(self.ttl_minutes).ok_or(TokenError::Expiry)?;
        let expires = now.checked_add_signed(ttl).ok_or(TokenError::Expiry)?;

        let claims = Claims {
            sub: username.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.key).map_err(TokenError::Sign)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("key", &"***")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(secret: &[u8], issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Validate signature, expiry, issuer and audience.
    ///
    /// # Errors
    /// Returns [`TokenError::Invalid`] if any check fails.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("key", &"***")
            .field("issuer", &self.validation.iss)
            .field("audience", &self.validation.aud)
            .finish()
    }
}
