//! Auth configuration and the shared state built from it.

use anyhow::{Result, anyhow};
use secrecy::{ExposeSecret, SecretString};

use super::credentials::Credentials;
use super::token::{TokenError, TokenSigner, TokenVerifier};

const DEFAULT_ISSUER: &str = "todoapp";
const DEFAULT_AUDIENCE: &str = "todoapp-client";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_USERNAME: &str = "testuser";
const DEFAULT_PASSWORD: &str = "password";

#[derive(Clone)]
pub struct AuthConfig {
    secret: SecretString,
    issuer: String,
    audience: String,
    token_ttl_minutes: i64,
    username: String,
    password: SecretString,
}

impl AuthConfig {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            username: DEFAULT_USERNAME.to_string(),
            password: SecretString::from(DEFAULT_PASSWORD.to_string()),
        }
    }

    #[must_use]
    pub fn with_issuer(mut self, issuer: String) -> Self {
        self.issuer = issuer;
        self
    }

    #[must_use]
    pub fn with_audience(mut self, audience: String) -> Self {
        self.audience = audience;
        self
    }

    #[must_use]
    pub fn with_token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, username: String, password: SecretString) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }

    #[must_use]
    pub const fn token_ttl_minutes(&self) -> i64 {
        self.token_ttl_minutes
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Reject settings that would make every login or verification fail.
    ///
    /// # Errors
    /// Returns an error if the secret, issuer, audience or username is empty, or
    /// if the TTL is not positive.
    pub fn validate(&self) -> Result<()> {
        if self.secret.expose_secret().is_empty() {
            return Err(anyhow!("JWT secret must not be empty"));
        }
        if self.issuer.trim().is_empty() || self.audience.trim().is_empty() {
            return Err(anyhow!("JWT issuer and audience must not be empty"));
        }
        if self.token_ttl_minutes <= 0 {
            return Err(anyhow!(
                "JWT TTL must be positive, got {} minutes",
                self.token_ttl_minutes
            ));
        }
        if self.username.is_empty() || self.password.expose_secret().is_empty() {
            return Err(anyhow!("username and password must not be empty"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"***")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Everything the login and todo handlers need to issue and check tokens.
#[derive(Debug)]
pub struct AuthState {
    credentials: Credentials,
    signer: TokenSigner,
    verifier: TokenVerifier,
}

impl AuthState {
    /// Build the state from a validated configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &AuthConfig) -> Result<Self> {
        config.validate()?;

        let secret = config.secret.expose_secret().as_bytes();

        Ok(Self {
            credentials: Credentials::single(config.username.clone(), config.password.clone()),
            signer: TokenSigner::new(
                secret,
                config.issuer.clone(),
                config.audience.clone(),
                config.token_ttl_minutes,
            ),
            verifier: TokenVerifier::new(secret, &config.issuer, &config.audience),
        })
    }

    /// Check the credentials and, on a match, issue a signed token.
    ///
    /// Returns `Ok(None)` for an unknown user or a wrong password without
    /// telling the two apart.
    ///
    /// # Errors
    /// Returns a [`TokenError`] if signing fails.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<String>, TokenError> {
        if !self.credentials.verify(username, password) {
            return Ok(None);
        }

        self.signer.issue(username).map(Some)
    }

    #[must_use]
    pub const fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }
}
