use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;
use clap::ArgMatches;
use tracing::Level;

/// `-v` occurrences (or the level named in `TODOAPP_LOG_LEVEL`) to a default
/// log level. No flag keeps the subscriber at `ERROR`.
const fn log_level(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

fn requested_log_level(matches: &ArgMatches) -> Option<Level> {
    let verbosity = matches
        .get_one::<u8>(commands::logging::ARG_VERBOSITY)
        .copied()
        .unwrap_or_default();
    log_level(verbosity)
}

/// Parse the command line, install logging and resolve the action to run.
///
/// Logging is set up before dispatch so configuration errors are reported
/// through the subscriber.
///
/// # Errors
///
/// Returns an error if telemetry cannot be initialized or the arguments do not
/// form a valid server configuration.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(requested_log_level(&matches))?;

    dispatch::handler(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_per_verbosity() {
        assert_eq!(log_level(0), None);
        assert_eq!(log_level(1), Some(Level::WARN));
        assert_eq!(log_level(2), Some(Level::INFO));
        assert_eq!(log_level(3), Some(Level::DEBUG));
        assert_eq!(log_level(4), Some(Level::TRACE));
        assert_eq!(log_level(9), Some(Level::TRACE));
    }

    #[test]
    fn requested_log_level_reads_flag() {
        temp_env::with_vars(
            [
                ("TODOAPP_JWT_SECRET", Some("start-secret")),
                ("TODOAPP_LOG_LEVEL", None),
            ],
            || {
                let matches = commands::new().get_matches_from(vec!["todoapp", "-vvv"]);
                assert_eq!(requested_log_level(&matches), Some(Level::DEBUG));

                let matches = commands::new().get_matches_from(vec!["todoapp"]);
                assert_eq!(requested_log_level(&matches), None);
            },
        );
    }
}
