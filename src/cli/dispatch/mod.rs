//! Map parsed CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{auth, ARG_NO_SEED, ARG_PORT};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let seed = !matches.get_flag(ARG_NO_SEED);

    let auth_opts = auth::Options::parse(matches)?;
    auth_opts.config.validate()?;

    Ok(Action::Server(Args {
        port,
        frontend_base_url: auth_opts.frontend_base_url,
        auth: auth_opts.config,
        seed,
    }))
}
