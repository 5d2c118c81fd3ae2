use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;
use url::Url;

use crate::Result;
use crate::error::ConfigError;
use crate::types::Locale;

use super::defaults::{
    default_connect_timeout, default_http_timeout, default_locale, default_mapping_file,
    default_queue_bound, default_slack_api_base, default_slack_channel,
};
use super::env::{EnvVars, env_bool, env_id_list, env_string};
use super::{
    Config, HumantimeDuration, Overrides, RedmineSettings, ReportSettings, SlackSettings,
};

const ENV_PREFIX: &str = "DIGEST";

pub(super) fn load(
    path: impl AsRef<Path>,
    env: &EnvVars,
) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("redmine.finished_status")
            .try_parsing(true)
            .source(Some(env.prefixed(&format!("{ENV_PREFIX}__")))),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) redmine: RawRedmine,
    #[serde(default)]
    pub(super) slack: RawSlack,
    #[serde(default)]
    pub(super) report: RawReport,
    #[serde(default)]
    pub(super) app: RawApp,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawRedmine {
    pub(super) endpoint: Option<String>,
    pub(super) api_key: Option<String>,
    pub(super) project: Option<String>,
    #[serde(default)]
    pub(super) finished_status: Vec<u32>,
    #[serde(default)]
    pub(super) server_side_filter: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawSlack {
    pub(super) token: Option<String>,
    #[serde(default = "default_slack_channel")]
    pub(super) channel: String,
    #[serde(default = "default_slack_api_base")]
    pub(super) api_base: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawReport {
    #[serde(default = "default_locale")]
    pub(super) locale: String,
    #[serde(default = "default_mapping_file")]
    pub(super) mapping_file: PathBuf,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawApp {
    #[serde(default = "default_queue_bound")]
    pub(super) queue_bound: usize,
    #[serde(default = "default_http_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) http_timeout: Duration,
    #[serde(default = "default_connect_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) connect_timeout: Duration,
}

impl RawConfig {
    /// Flat variable names used by existing cron deployments.
    pub(super) fn apply_env_overrides(
        &mut self,
        env: &EnvVars,
    ) -> std::result::Result<(), ConfigError> {
        if let Some(endpoint) = env_string(env, "REDMINE_ENDPOINT") {
            self.redmine.endpoint = Some(endpoint);
        }
        if let Some(api_key) = env_string(env, "REDMINE_APIKEY") {
            self.redmine.api_key = Some(api_key);
        }
        if let Some(project) = env_string(env, "REDMINE_PROJECT") {
            self.redmine.project = Some(project);
        }
        if let Some(ids) = env_id_list(env, "REDMINE_FINISHED_STATUS")? {
            self.redmine.finished_status = ids;
        }
        if let Some(server_side) = env_bool(env, "REDMINE_SERVER_SIDE_FILTER")? {
            self.redmine.server_side_filter = server_side;
        }
        if let Some(token) = env_string(env, "SLACK_TOKEN") {
            self.slack.token = Some(token);
        }
        if let Some(channel) = env_string(env, "SLACK_CHANNEL") {
            self.slack.channel = channel;
        }
        if let Some(path) = env_string(env, "USER_MAPPING_FILE") {
            self.report.mapping_file = PathBuf::from(path);
        }
        if let Some(locale) = env_string(env, "REPORT_LOCALE") {
            self.report.locale = locale;
        }
        Ok(())
    }

    pub(super) fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(endpoint) = &overrides.redmine_endpoint {
            self.redmine.endpoint = Some(endpoint.clone());
        }
        if let Some(api_key) = &overrides.redmine_api_key {
            self.redmine.api_key = Some(api_key.clone());
        }
        if let Some(project) = &overrides.redmine_project {
            self.redmine.project = Some(project.clone());
        }
        if !overrides.finished_status.is_empty() {
            self.redmine.finished_status.clone_from(&overrides.finished_status);
        }
        if let Some(token) = &overrides.slack_token {
            self.slack.token = Some(token.clone());
        }
        if let Some(channel) = &overrides.slack_channel {
            self.slack.channel.clone_from(channel);
        }
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let endpoint_str = self.redmine.endpoint.ok_or(ConfigError::MissingField {
            field: "redmine.endpoint",
        })?;
        let endpoint = Url::parse(&endpoint_str).map_err(|err| ConfigError::InvalidField {
            field: "redmine.endpoint",
            message: err.to_string(),
        })?;
        let api_key = non_empty(self.redmine.api_key, "redmine.api_key")?;
        let project = non_empty(self.redmine.project, "redmine.project")?;
        let token = non_empty(self.slack.token, "slack.token")?;

        if self.slack.channel.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "slack.channel",
                message: "channel cannot be empty".to_string(),
            }
            .into());
        }
        let api_base =
            Url::parse(&self.slack.api_base).map_err(|err| ConfigError::InvalidField {
                field: "slack.api_base",
                message: err.to_string(),
            })?;

        let locale = Locale::from_str(&self.report.locale).map_err(|err| {
            ConfigError::InvalidField {
                field: "report.locale",
                message: err,
            }
        })?;

        if self.app.queue_bound == 0 {
            return Err(ConfigError::InvalidField {
                field: "app.queue_bound",
                message: "queue bound must be greater than zero".to_string(),
            }
            .into());
        }
        if self.app.http_timeout.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "app.http_timeout",
                message: "timeout must be greater than zero".to_string(),
            }
            .into());
        }
        if self.app.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "app.connect_timeout",
                message: "timeout must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(Config {
            redmine: RedmineSettings {
                endpoint,
                api_key: api_key.into(),
                project,
                finished_status: self.redmine.finished_status,
                server_side_filter: self.redmine.server_side_filter,
            },
            slack: SlackSettings {
                token: token.into(),
                channel: self.slack.channel,
                api_base,
            },
            report: ReportSettings {
                locale,
                mapping_file: self.report.mapping_file,
            },
            queue_capacity: self.app.queue_bound,
            http_connect_timeout: self.app.connect_timeout,
            http_request_timeout: self.app.http_timeout,
        })
    }
}

fn non_empty(
    value: Option<String>,
    field: &'static str,
) -> std::result::Result<String, ConfigError> {
    let value = value.ok_or(ConfigError::MissingField { field })?;
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            field,
            message: "value cannot be empty".to_string(),
        });
    }
    Ok(value)
}

impl Default for RawSlack {
    fn default() -> Self {
        Self {
            token: None,
            channel: default_slack_channel(),
            api_base: default_slack_api_base(),
        }
    }
}

impl Default for RawReport {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            mapping_file: default_mapping_file(),
        }
    }
}

impl Default for RawApp {
    fn default() -> Self {
        Self {
            queue_bound: default_queue_bound(),
            http_timeout: default_http_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}
