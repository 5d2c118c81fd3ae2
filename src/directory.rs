use std::collections::HashMap;

use crate::error::LookupError;
use crate::mapping::UserMapping;
use crate::report::escape_mrkdwn;
use crate::resolve;
use crate::types::{Assignee, ChatUser, TrackerUser};

/// Read-only snapshot of both user lists and the mapping table, populated once
/// before classification and only borrowed afterwards.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    tracker_users: HashMap<u32, TrackerUser>,
    chat_users: Vec<ChatUser>,
    mapping: UserMapping,
}

impl Directory {
    #[must_use]
    pub fn new(
        tracker_users: impl IntoIterator<Item = TrackerUser>,
        chat_users: Vec<ChatUser>,
        mapping: UserMapping,
    ) -> Self {
        Self {
            tracker_users: tracker_users.into_iter().map(|u| (u.id, u)).collect(),
            chat_users,
            mapping,
        }
    }

    /// # Errors
    ///
    /// Returns [`LookupError::UserNotFound`] when Redmine did not list the
    /// assignee, e.g. a locked account or a group assignment.
    pub fn tracker_user(&self, assignee: &Assignee) -> Result<&TrackerUser, LookupError> {
        self.tracker_users
            .get(&assignee.id)
            .ok_or_else(|| LookupError::UserNotFound {
                id: assignee.id,
                name: assignee.name.clone(),
            })
    }

    #[must_use]
    pub fn chat_users(&self) -> &[ChatUser] {
        &self.chat_users
    }

    #[must_use]
    pub const fn mapping(&self) -> &UserMapping {
        &self.mapping
    }

    #[must_use]
    pub fn tracker_len(&self) -> usize {
        self.tracker_users.len()
    }

    /// Text to show for a ticket's assignee: a Slack mention when resolvable,
    /// otherwise the escaped Redmine display name. `None` when nobody is
    /// assigned.
    #[must_use]
    pub fn assignee_label(&self, assignee: Option<&Assignee>) -> Option<String> {
        let assignee = assignee?;
        let user = match self.tracker_user(assignee) {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "falling back to Redmine display name");
                return Some(escape_mrkdwn(&assignee.name));
            }
        };
        match resolve::resolve(user, &self.chat_users, &self.mapping) {
            Some(chat) => Some(chat.mention()),
            None => {
                tracing::debug!(login = %user.login, "no Slack user matched");
                Some(escape_mrkdwn(&assignee.name))
            }
        }
    }
}
