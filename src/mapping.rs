use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

pub const DEFAULT_MAPPING_FILE: &str = "./usermapping.json";

/// Manual overrides from a Slack display name (as shown in Slack) to the name
/// or login it should be treated as.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserMapping {
    entries: HashMap<String, String>,
}

impl UserMapping {
    /// Load the mapping file. A missing or malformed file yields an empty
    /// table; the run continues either way.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no user mapping file");
                return Self::default();
            }
        };
        match Self::from_json(&raw) {
            Ok(mapping) => {
                debug!(path = %path.display(), entries = mapping.len(), "user mapping loaded");
                mapping
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring malformed user mapping file");
                Self::default()
            }
        }
    }

    /// # Errors
    ///
    /// Returns the decoder error when `raw` is not a JSON object of strings.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for UserMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
