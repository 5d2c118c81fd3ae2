use serde::Deserialize;

use crate::types::ChatUser;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct AuthIdentity {
    pub user_id: String,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct PostedMessage {
    pub channel: String,
    pub ts: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersListPage {
    #[serde(default)]
    pub(crate) members: Vec<RawMember>,
    #[serde(default)]
    pub(crate) response_metadata: Option<ResponseMetadata>,
}

impl UsersListPage {
    pub(crate) fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()
            .map(|meta| meta.next_cursor.as_str())
            .filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMetadata {
    #[serde(default)]
    pub(crate) next_cursor: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMember {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    real_name: Option<String>,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    is_bot: bool,
    #[serde(default)]
    profile: Option<RawProfile>,
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    #[serde(default)]
    real_name: Option<String>,
}

impl RawMember {
    /// Deleted accounts and bots are never mention candidates.
    pub(crate) const fn is_candidate(&self) -> bool {
        !self.deleted && !self.is_bot
    }
}

impl From<RawMember> for ChatUser {
    fn from(value: RawMember) -> Self {
        let real_name = value
            .real_name
            .filter(|name| !name.is_empty())
            .or_else(|| value.profile.and_then(|p| p.real_name))
            .unwrap_or_default();
        Self {
            id: value.id,
            name: value.name,
            real_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RawMember, UsersListPage};
    use crate::types::ChatUser;

    #[test]
    fn real_name_falls_back_to_profile() {
        let member: RawMember = match serde_json::from_value(serde_json::json!({
            "id": "U1",
            "name": "jdoe",
            "profile": {"real_name": "Jane Doe"}
        })) {
            Ok(member) => member,
            Err(err) => panic!("member should decode: {err}"),
        };
        assert!(member.is_candidate());
        let user = ChatUser::from(member);
        assert_eq!(user.real_name, "Jane Doe");
    }

    #[test]
    fn empty_cursor_ends_paging() {
        let page: UsersListPage = match serde_json::from_value(serde_json::json!({
            "ok": true,
            "members": [],
            "response_metadata": {"next_cursor": ""}
        })) {
            Ok(page) => page,
            Err(err) => panic!("page should decode: {err}"),
        };
        assert_eq!(page.next_cursor(), None);
    }
}
