use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::export::FontFamily;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so an empty environment yields a working local setup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the `resume-storage.json` snapshot.
    pub data_dir: PathBuf,
    /// Directory the print export writes into.
    pub export_dir: PathBuf,
    pub export_font: FontFamily,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            data_dir: PathBuf::from(env_or("RESUME_DATA_DIR", "./data")),
            export_dir: PathBuf::from(env_or("RESUME_EXPORT_DIR", "./exports")),
            export_font: env_or("RESUME_EXPORT_FONT", "inter")
                .parse::<FontFamily>()
                .map_err(|e| anyhow!(e))
                .context("RESUME_EXPORT_FONT must be inter, eb_garamond or computer_modern")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
