use crate::{
    api::{self, AuthConfig},
    todo::TodoStore,
};
use anyhow::Result;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub frontend_base_url: String,
    pub auth: AuthConfig,
    pub seed: bool,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the JWT settings are invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let store = if args.seed {
        TodoStore::seeded()
    } else {
        TodoStore::new()
    };

    api::new(args.port, &args.frontend_base_url, args.auth, store).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("frontend_base_url", args.frontend_base_url.clone()),
        ("jwt_issuer", args.auth.issuer().to_string()),
        ("jwt_audience", args.auth.audience().to_string()),
        (
            "jwt_ttl",
            format!("{}m", args.auth.token_ttl_minutes()),
        ),
        ("username", args.auth.username().to_string()),
        ("seed", args.seed.to_string()),
    ];
    info!("{}", startup_message("Startup configuration", &entries));
}

fn startup_message(title: &str, entries: &[(&str, String)]) -> String {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {} - {}\n\n{title}:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    message
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}
