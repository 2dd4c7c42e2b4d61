//! Bearer token extraction for the protected todo routes.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::debug;

use super::token::TokenVerifier;
use crate::api::error::ApiError;

/// Authenticated caller derived from a valid bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
}

/// Resolve the `Authorization` header into a principal, or fail with 401.
///
/// # Errors
/// Returns [`ApiError::Unauthorized`] when the header is missing, malformed,
/// or the token fails validation.
pub fn require_auth(headers: &HeaderMap, verifier: &TokenVerifier) -> Result<Principal, ApiError> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(ApiError::Unauthorized(
            "Missing bearer token.".to_string(),
        ));
    };

    match verifier.verify(&token) {
        Ok(claims) => Ok(Principal {
            username: claims.sub,
        }),
        Err(err) => {
            debug!("Rejected bearer token: {err}");
            Err(ApiError::Unauthorized(
                "Invalid or expired token.".to_string(),
            ))
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::token::TokenSigner;
    use axum::http::HeaderValue;

    const SECRET: &[u8] = b"principal-test-secret";

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET, "todoapp", "todoapp-client")
    }

    #[test]
    fn extract_bearer_token_trims_value() {
        assert_eq!(
            extract_bearer_token(&headers("Bearer   abc.def  ")),
            Some("abc.def".to_string())
        );
        assert_eq!(
            extract_bearer_token(&headers("bearer abc")),
            Some("abc".to_string())
        );
    }

    #[test]
    fn extract_bearer_token_rejects_other_schemes() {
        assert_eq!(extract_bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer ")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn require_auth_accepts_valid_token() {
        let signer = TokenSigner::new(
            SECRET,
            "todoapp".to_string(),
            "todoapp-client".to_string(),
            5,
        );
        let token = signer.issue("testuser").unwrap();
        let principal = require_auth(&headers(&format!("Bearer {token}")), &verifier()).unwrap();
        assert_eq!(principal.username, "testuser");
    }

    #[test]
    fn require_auth_rejects_missing_and_invalid() {
        let missing = require_auth(&HeaderMap::new(), &verifier());
        assert!(matches!(missing, Err(ApiError::Unauthorized(_))));

        let invalid = require_auth(&headers("Bearer nope"), &verifier());
        assert!(matches!(invalid, Err(ApiError::Unauthorized(_))));
    }
}
