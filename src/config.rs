use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use dupecheck::fetch::sources::DEFAULT_USER_AGENT;
use dupecheck::pipeline::CompareSettings;

/// Default number of pages loaded at once.
const DEFAULT_FETCH_CONCURRENCY: usize = 4;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// value has a default; CLI flags override whatever is loaded here.
pub struct Config {
    /// Similarity threshold for reporting a pair (DUPECHECK_THRESHOLD)
    pub threshold: f64,
    /// Spans must be longer than this many characters (DUPECHECK_MIN_SPAN)
    pub min_span_chars: usize,
    /// Words of context around each change in the diff (DUPECHECK_DIFF_CONTEXT)
    pub diff_context: usize,
    /// Pages loaded concurrently (DUPECHECK_FETCH_CONCURRENCY)
    pub fetch_concurrency: usize,
    pub user_agent: String,
}

/// Parse an optional env var, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let defaults = CompareSettings::default();
        Ok(Self {
            threshold: env_or("DUPECHECK_THRESHOLD", defaults.threshold)?,
            min_span_chars: env_or("DUPECHECK_MIN_SPAN", defaults.min_span_chars)?,
            diff_context: env_or("DUPECHECK_DIFF_CONTEXT", defaults.diff_context)?,
            fetch_concurrency: env_or("DUPECHECK_FETCH_CONCURRENCY", DEFAULT_FETCH_CONCURRENCY)?,
            user_agent: env::var("DUPECHECK_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        })
    }

    /// Check values that parse fine but make no sense.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            anyhow::bail!(
                "Similarity threshold must be between 0 and 1, got {}.\n\
                 Set DUPECHECK_THRESHOLD or pass --threshold.",
                self.threshold
            );
        }
        if self.fetch_concurrency == 0 {
            anyhow::bail!("DUPECHECK_FETCH_CONCURRENCY must be at least 1");
        }
        Ok(())
    }

    pub fn compare_settings(&self) -> CompareSettings {
        CompareSettings {
            threshold: self.threshold,
            min_span_chars: self.min_span_chars,
            diff_context: self.diff_context,
        }
    }
}
