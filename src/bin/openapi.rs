//! Writes the service's OpenAPI document to stdout as pretty JSON.

use anyhow::{Context, Result};
use std::io::{self, Write};

fn main() -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &todoapp::api::openapi())
        .context("Failed to serialize the OpenAPI document")?;
    writeln!(stdout)?;
    Ok(())
}
