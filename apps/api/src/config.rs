use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Application configuration loaded from environment variables.
/// A `.env` file acts as the secrets file; the Gemini key may instead be
/// supplied per request by the caller.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default Gemini API key. `None` means every request must carry its own.
    pub gemini_api_key: Option<String>,
    pub templates_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub weasyprint_bin: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            templates_dir: path_env("TEMPLATES_DIR", || bundled_dir("templates")),
            assets_dir: path_env("ASSETS_DIR", || bundled_dir("assets")),
            weasyprint_bin: path_env("WEASYPRINT_BIN", || PathBuf::from("weasyprint")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Empty and whitespace-only values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn path_env(key: &str, default: impl FnOnce() -> PathBuf) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default())
}

/// Static assets shipped with the crate (the fixed template and logo).
pub fn bundled_dir(sub: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(sub)
}
