use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_CSV_PATH: &str = "data/job-matching_data.csv";
pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_MAX_FEATURES: usize = 5000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; a present but malformed value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Data source used when a request does not name its own CSV file.
    pub jobs_csv_path: PathBuf,
    pub default_top_n: usize,
    /// Vocabulary cap for the TF-IDF vectorizer.
    pub max_features: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            rust_log: "info".to_string(),
            jobs_csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            default_top_n: DEFAULT_TOP_N,
            max_features: DEFAULT_MAX_FEATURES,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            jobs_csv_path: lookup("JOBS_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.jobs_csv_path),
            default_top_n: parse_or(&lookup, "DEFAULT_TOP_N", defaults.default_top_n)?,
            max_features: parse_or(&lookup, "TFIDF_MAX_FEATURES", defaults.max_features)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
