use std::collections::HashMap;

use crate::error::ConfigError;

/// Snapshot of the variables consulted while loading configuration.
#[derive(Debug, Clone, Default)]
pub struct EnvVars(HashMap<String, String>);

impl EnvVars {
    /// Variables of the current process. Non UTF-8 entries are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    pub(super) fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub(super) fn prefixed(&self, prefix: &str) -> HashMap<String, String> {
        self.0
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

pub(super) fn env_string(env: &EnvVars, key: &'static str) -> Option<String> {
    env.get(key)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

pub(super) fn env_parse<T>(
    env: &EnvVars,
    key: &'static str,
) -> std::result::Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(value) = env_string(env, key) {
        return value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| ConfigError::InvalidField {
                field: key,
                message: err.to_string(),
            });
    }
    Ok(None)
}

pub(super) fn env_bool(
    env: &EnvVars,
    key: &'static str,
) -> std::result::Result<Option<bool>, ConfigError> {
    env_parse::<bool>(env, key)
}

/// Comma separated status ids, e.g. `REDMINE_FINISHED_STATUS=5,6`.
pub(super) fn env_id_list(
    env: &EnvVars,
    key: &'static str,
) -> std::result::Result<Option<Vec<u32>>, ConfigError> {
    let Some(value) = env_string(env, key) else {
        return Ok(None);
    };
    parse_id_list(&value)
        .map(Some)
        .map_err(|message| ConfigError::InvalidField {
            field: key,
            message,
        })
}

fn parse_id_list(raw: &str) -> std::result::Result<Vec<u32>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map_err(|err| format!("invalid status id {part:?}: {err}"))
        })
        .collect()
}
