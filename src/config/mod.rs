use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::error::Error as DigestError;
use crate::types::Locale;

mod defaults;
mod env;
mod raw;
mod serde;

pub use self::env::EnvVars;
use self::serde::HumantimeDuration;

/// Redmine caps `limit` at 100 per request.
pub const PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub redmine: RedmineSettings,
    pub slack: SlackSettings,
    pub report: ReportSettings,
    pub queue_capacity: usize,
    pub http_connect_timeout: Duration,
    pub http_request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct RedmineSettings {
    pub endpoint: Url,
    pub api_key: SecretString,
    /// Numeric id, name or identifier of the target project.
    pub project: String,
    /// Status ids considered as finished; tickets in these are skipped.
    pub finished_status: Vec<u32>,
    /// Also narrow `issues.json` by project on the server.
    pub server_side_filter: bool,
}

#[derive(Debug, Clone)]
pub struct SlackSettings {
    pub token: SecretString,
    pub channel: String,
    pub api_base: Url,
}

#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub locale: Locale,
    pub mapping_file: PathBuf,
}

/// Values supplied on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub redmine_endpoint: Option<String>,
    pub redmine_api_key: Option<String>,
    pub redmine_project: Option<String>,
    pub finished_status: Vec<u32>,
    pub slack_token: Option<String>,
    pub slack_channel: Option<String>,
}

impl Config {
    /// Load configuration from a file, the environment and command-line
    /// overrides, in increasing precedence.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be parsed, when
    /// environment overrides are invalid, or when the resulting values fail
    /// validation.
    pub fn load(path: impl AsRef<Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(path, &EnvVars::from_process(), overrides)
    }

    /// Same as [`Config::load`] with an explicit set of environment variables.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with_env(
        path: impl AsRef<Path>,
        env: &EnvVars,
        overrides: &Overrides,
    ) -> Result<Self> {
        let mut raw = raw::load(path, env).map_err(DigestError::from)?;
        raw.apply_env_overrides(env).map_err(DigestError::from)?;
        raw.apply_overrides(overrides);
        raw.validate_and_build()
    }
}
