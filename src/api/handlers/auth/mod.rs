//! Login and bearer token handling.
//!
//! A single configured username/password pair is accepted. A successful login
//! returns an HS256 JWT; the todo routes accept it until it expires.

mod credentials;
pub(crate) mod login;
pub(crate) mod principal;
mod state;
pub(crate) mod token;

pub use principal::{Principal, require_auth};
pub use state::{AuthConfig, AuthState};
pub use token::{Claims, TokenError, TokenVerifier};
