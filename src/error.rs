use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Redmine(#[from] RedmineError),
    #[error(transparent)]
    Slack(#[from] SlackError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("missing required configuration field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum RedmineError {
    #[error("failed to build Redmine HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("Redmine request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status from Redmine {path}: {status}")]
    HttpStatus {
        path: String,
        status: reqwest::StatusCode,
    },
    #[error("invalid JSON payload from Redmine: {message}")]
    Json { message: String },
    #[error("project not found: {project}")]
    ProjectNotFound { project: String },
}

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("failed to build Slack HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("Slack request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status from Slack {method}: {status}")]
    HttpStatus {
        method: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("invalid JSON payload from Slack: {message}")]
    Json { message: String },
    #[error("Slack {method} failed: {error}")]
    Api {
        method: &'static str,
        error: String,
    },
}

/// Lookup misses never abort a run; callers log them and fall back to the
/// raw display value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("the user is not found: {id} / {name}")]
    UserNotFound { id: u32, name: String },
}

impl From<reqwest::Error> for RedmineError {
    fn from(source: reqwest::Error) -> Self {
        Self::Request { source }
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(source: reqwest::Error) -> Self {
        Self::Request { source }
    }
}

impl Error {
    /// Remote failures abort the run; the scheduler is expected to re-run it.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Redmine(_) | Self::Slack(_))
    }
}
