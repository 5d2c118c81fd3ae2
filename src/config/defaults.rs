use std::path::PathBuf;
use std::time::Duration;

use crate::mapping::DEFAULT_MAPPING_FILE;

pub(super) fn default_slack_channel() -> String {
    "#general".to_string()
}

pub(super) fn default_slack_api_base() -> String {
    "https://slack.com/api".to_string()
}

pub(super) fn default_locale() -> String {
    "ja".to_string()
}

pub(super) fn default_mapping_file() -> PathBuf {
    PathBuf::from(DEFAULT_MAPPING_FILE)
}

pub(super) const fn default_queue_bound() -> usize {
    10
}

pub(super) const fn default_http_timeout() -> Duration {
    Duration::from_secs(10)
}

pub(super) const fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}
