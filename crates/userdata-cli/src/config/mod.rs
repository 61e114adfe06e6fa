//! Configuration management.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use userdata::RetryConfig;

use crate::cli::args::RetryArgs;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/userdata/config.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Provisioning endpoint used when none is given on the command line.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Retry defaults.
    #[serde(default)]
    pub retry: RetrySettings,
}

/// Retry settings as they appear in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Maximum number of requests.
    pub attempts: Option<u32>,

    /// Overall time limit in seconds.
    pub deadline_secs: Option<u64>,

    /// Pause between attempts in milliseconds.
    pub delay_ms: Option<u64>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Double the pause after every failed attempt.
    #[serde(default)]
    pub exponential: bool,

    /// Retry until success.
    #[serde(default)]
    pub forever: bool,
}

/// Attempts used when neither the flags nor the config file bound the fetch.
const DEFAULT_ATTEMPTS: u32 = 10;

/// Per-request timeout used when none is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

impl Config {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] if
    /// it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        Ok(config)
    }

    /// Combine command-line flags with the file settings. Flags win.
    pub fn retry_config(&self, args: &RetryArgs) -> RetryConfig {
        let file = &self.retry;
        let attempts = args.attempts.or(file.attempts);
        let deadline = args.deadline.or(file.deadline_secs).map(Duration::from_secs);
        let forever = args.forever || (file.forever && args.attempts.is_none());

        let retry = match (forever, attempts, deadline) {
            (true, _, None) => RetryConfig::unbounded(),
            (true, _, Some(d)) | (false, None, Some(d)) => RetryConfig::deadline(d),
            (false, Some(n), Some(d)) => RetryConfig::attempts(n).within(d),
            (false, Some(n), None) => RetryConfig::attempts(n),
            (false, None, None) => RetryConfig::attempts(DEFAULT_ATTEMPTS),
        };

        let retry = match args.delay.or(file.delay_ms) {
            Some(ms) => retry.delay(Duration::from_millis(ms)),
            None => retry,
        };

        retry.exponential(args.exponential || file.exponential)
    }

    /// Per-request timeout. Flags win.
    pub fn timeout(&self, args: &RetryArgs) -> Duration {
        args.timeout
            .or(self.retry.timeout_secs)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }
}
