use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

use crate::api::AuthConfig;

pub const ARG_FRONTEND_BASE_URL: &str = "frontend-base-url";
pub const ARG_JWT_SECRET: &str = "jwt-secret";
pub const ARG_JWT_ISSUER: &str = "jwt-issuer";
pub const ARG_JWT_AUDIENCE: &str = "jwt-audience";
pub const ARG_JWT_TTL_MINUTES: &str = "jwt-ttl-minutes";
pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";

#[derive(Debug)]
pub struct Options {
    pub frontend_base_url: String,
    pub config: AuthConfig,
}

impl Options {
    /// Collect the login and token settings into an [`AuthConfig`].
    ///
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let frontend_base_url = matches
            .get_one::<String>(ARG_FRONTEND_BASE_URL)
            .cloned()
            .context("missing required argument: --frontend-base-url")?;
        let secret = matches
            .get_one::<String>(ARG_JWT_SECRET)
            .cloned()
            .context("missing required argument: --jwt-secret")?;
        let issuer = matches
            .get_one::<String>(ARG_JWT_ISSUER)
            .cloned()
            .context("missing required argument: --jwt-issuer")?;
        let audience = matches
            .get_one::<String>(ARG_JWT_AUDIENCE)
            .cloned()
            .context("missing required argument: --jwt-audience")?;
        let ttl_minutes = matches
            .get_one::<i64>(ARG_JWT_TTL_MINUTES)
            .copied()
            .context("missing required argument: --jwt-ttl-minutes")?;
        let username = matches
            .get_one::<String>(ARG_USERNAME)
            .cloned()
            .context("missing required argument: --username")?;
        let password = matches
            .get_one::<String>(ARG_PASSWORD)
            .cloned()
            .context("missing required argument: --password")?;

        let config = AuthConfig::new(SecretString::from(secret))
            .with_issuer(issuer)
            .with_audience(audience)
            .with_token_ttl_minutes(ttl_minutes)
            .with_credentials(username, SecretString::from(password));

        Ok(Self {
            frontend_base_url,
            config,
        })
    }
}

pub fn with_args(command: Command) -> Command {
    let command = with_frontend_args(command);
    let command = with_jwt_args(command);
    with_credential_args(command)
}

fn with_frontend_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_FRONTEND_BASE_URL)
            .long(ARG_FRONTEND_BASE_URL)
            .help("Frontend base URL allowed by CORS")
            .env("TODOAPP_FRONTEND_BASE_URL")
            .default_value("http://localhost:8080"),
    )
}

fn with_jwt_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_JWT_SECRET)
                .long(ARG_JWT_SECRET)
                .help("HMAC secret used to sign and verify bearer tokens")
                .env("TODOAPP_JWT_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_JWT_ISSUER)
                .long(ARG_JWT_ISSUER)
                .help("Issuer claim written to and required on tokens")
                .env("TODOAPP_JWT_ISSUER")
                .default_value("todoapp"),
        )
        .arg(
            Arg::new(ARG_JWT_AUDIENCE)
                .long(ARG_JWT_AUDIENCE)
                .help("Audience claim written to and required on tokens")
                .env("TODOAPP_JWT_AUDIENCE")
                .default_value("todoapp-client"),
        )
        .arg(
            Arg::new(ARG_JWT_TTL_MINUTES)
                .long(ARG_JWT_TTL_MINUTES)
                .help("Token lifetime in minutes")
                .env("TODOAPP_JWT_TTL_MINUTES")
                .default_value("60")
                .value_parser(clap::value_parser!(i64).range(1..)),
        )
}

fn with_credential_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_USERNAME)
                .long(ARG_USERNAME)
                .help("Username accepted by the login endpoint")
                .env("TODOAPP_USERNAME")
                .default_value("testuser"),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Password accepted by the login endpoint")
                .env("TODOAPP_PASSWORD")
                .hide_env_values(true)
                .default_value("password"),
        )
}
