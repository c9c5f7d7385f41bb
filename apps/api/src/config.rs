use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::recommendation::explanation::DEFAULT_TOP_N;
use crate::recommendation::registry::RegistrySource;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON registry file; `None` means the bundled registry.
    pub career_models_path: Option<PathBuf>,
    /// k used when a request does not pass `top_k`.
    pub default_top_k: usize,
    /// Number of contributions quoted in each explanation.
    pub explanation_top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            career_models_path: None,
            default_top_k: 3,
            explanation_top_n: DEFAULT_TOP_N,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            career_models_path: std::env::var("CAREER_MODELS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            default_top_k: positive_env("DEFAULT_TOP_K", defaults.default_top_k)?,
            explanation_top_n: positive_env("EXPLANATION_TOP_N", defaults.explanation_top_n)?,
        })
    }

    pub fn registry_source(&self) -> RegistrySource {
        match &self.career_models_path {
            Some(path) => RegistrySource::File(path.clone()),
            None => RegistrySource::Bundled,
        }
    }
}

fn positive_env(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => parse_positive(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize> {
    let value = raw
        .trim()
        .parse::<usize>()
        .with_context(|| format!("{key} must be a positive integer, got '{raw}'"))?;
    if value == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("DEFAULT_TOP_K", " 5 ").unwrap(), 5);
        assert!(parse_positive("DEFAULT_TOP_K", "0").is_err());
        assert!(parse_positive("DEFAULT_TOP_K", "-1").is_err());
        assert!(parse_positive("DEFAULT_TOP_K", "three").is_err());
    }

    #[test]
    fn test_registry_source_follows_path() {
        let mut config = Config::default();
        assert_eq!(config.registry_source(), RegistrySource::Bundled);

        config.career_models_path = Some(PathBuf::from("/etc/nextstep/careers.json"));
        assert_eq!(
            config.registry_source(),
            RegistrySource::File(PathBuf::from("/etc/nextstep/careers.json"))
        );
    }
}
