//! Runtime settings read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `CARDIORISK_REMOTE_URLS` | empty (local scoring only) |
//! | `CARDIORISK_REMOTE_TIMEOUT_MS` | `5000` |
//! | `CARDIORISK_POLICY` | `remote-then-local` if URLs are set, else `local` |
//! | `CARDIORISK_LOG_MODE` | `stderr` |
//! | `CARDIORISK_LOG_FILE` | `cardiorisk.log` |

use std::path::PathBuf;
use std::time::Duration;

use crate::application::ScoringPolicy;
use crate::CardioError;

const REMOTE_URLS_ENV: &str = "CARDIORISK_REMOTE_URLS";
const REMOTE_TIMEOUT_ENV: &str = "CARDIORISK_REMOTE_TIMEOUT_MS";
const POLICY_ENV: &str = "CARDIORISK_POLICY";
const LOG_MODE_ENV: &str = "CARDIORISK_LOG_MODE";
const LOG_FILE_ENV: &str = "CARDIORISK_LOG_FILE";

const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 5000;
const DEFAULT_LOG_FILE: &str = "cardiorisk.log";

/// Where log output goes. Stdout is reserved for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Stderr,
    File,
}

/// Settings for the scoring service and the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub remote_endpoints: Vec<String>,
    pub remote_timeout: Duration,
    pub policy: ScoringPolicy,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remote_endpoints: Vec::new(),
            remote_timeout: Duration::from_millis(DEFAULT_REMOTE_TIMEOUT_MS),
            policy: ScoringPolicy::LocalOnly,
            log_mode: LogMode::Stderr,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    /// Returns `CardioError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, CardioError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// Returns `CardioError::Config` if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CardioError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let remote_endpoints: Vec<String> = lookup(REMOTE_URLS_ENV)
            .map(|urls| {
                urls.split(',')
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        for url in &remote_endpoints {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CardioError::Config(format!(
                    "{REMOTE_URLS_ENV}: '{url}' is not an http(s) URL"
                )));
            }
        }

        let remote_timeout = match lookup(REMOTE_TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(CardioError::Config(format!(
                        "{REMOTE_TIMEOUT_ENV} must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => defaults.remote_timeout,
        };

        let policy = match lookup(POLICY_ENV).as_deref().map(str::trim) {
            Some("local") => ScoringPolicy::LocalOnly,
            Some("remote-then-local") => ScoringPolicy::RemoteThenLocal,
            Some(other) => {
                return Err(CardioError::Config(format!(
                    "{POLICY_ENV} must be 'local' or 'remote-then-local', got '{other}'"
                )))
            }
            None if remote_endpoints.is_empty() => ScoringPolicy::LocalOnly,
            None => ScoringPolicy::RemoteThenLocal,
        };

        let log_mode = match lookup(LOG_MODE_ENV).as_deref().map(str::trim) {
            None | Some("stderr") => LogMode::Stderr,
            Some("file") => LogMode::File,
            Some(other) => {
                return Err(CardioError::Config(format!(
                    "{LOG_MODE_ENV} must be 'stderr' or 'file', got '{other}'"
                )))
            }
        };

        let log_file = lookup(LOG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        Ok(Self {
            remote_endpoints,
            remote_timeout,
            policy,
            log_mode,
            log_file,
        })
    }
}
