use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// The API key is only demanded by runs that talk to the model.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub output_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            output_dir: optional_env("DPR_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_output_dir),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the Anthropic key, failing the way a missing required variable does.
    pub fn require_api_key(&self) -> Result<&str> {
        self.anthropic_api_key
            .as_deref()
            .with_context(|| "Required environment variable 'ANTHROPIC_API_KEY' is not set")
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// `$HOME/Downloads`, or the working directory when there is no home.
fn default_output_dir() -> PathBuf {
    optional_env("HOME")
        .map(|home| PathBuf::from(home).join("Downloads"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_api_key_missing() {
        let config = Config {
            anthropic_api_key: None,
            output_dir: PathBuf::from("."),
            rust_log: "info".to_string(),
        };
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_require_api_key_present() {
        let config = Config {
            anthropic_api_key: Some("sk-test".to_string()),
            output_dir: PathBuf::from("."),
            rust_log: "info".to_string(),
        };
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
    }
}
