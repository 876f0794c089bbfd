//! Subcommand handlers.

pub mod appearance;
pub mod config;
pub mod library;
pub mod request;
pub mod store;
pub mod tier;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Inline text or a file to read it from.
pub(crate) fn read_content(inline: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (inline, file) {
        (Some(content), _) => Ok(content),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read `{}`", path.display())),
        (None, None) => Ok(String::new()),
    }
}

pub(crate) fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
