use serde_json::json;
use tracing::info;

use crate::Result;
use crate::types::ChatUser;

use super::SlackClient;
use super::client::Payload;
use super::models::{AuthIdentity, PostedMessage, UsersListPage};

const USERS_PAGE_LIMIT: u32 = 200;

type NoBody = ();

impl SlackClient {
    /// Verifies the token; called first so a bad token fails fast.
    pub async fn auth_test(&self) -> Result<AuthIdentity> {
        let identity: AuthIdentity = self
            .call("auth.test", Payload::<NoBody>::Query(&[]))
            .await?;
        info!(user_id = %identity.user_id, "slack token verified");
        Ok(identity)
    }

    /// Active, non-bot workspace members, following `next_cursor`.
    pub async fn users(&self) -> Result<Vec<ChatUser>> {
        let mut users = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut query = vec![("limit", USERS_PAGE_LIMIT.to_string())];
            if let Some(cursor) = cursor.take() {
                query.push(("cursor", cursor));
            }
            let page: UsersListPage = self
                .call("users.list", Payload::<NoBody>::Query(&query))
                .await?;
            let next = page.next_cursor().map(str::to_string);
            users.extend(
                page.members
                    .into_iter()
                    .filter(|member| member.is_candidate())
                    .map(ChatUser::from),
            );
            match next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        info!(count = users.len(), "slack users loaded");
        Ok(users)
    }

    /// Post `text` with `link_names` so `@name` mentions are linked.
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<PostedMessage> {
        let body = json!({
            "channel": channel,
            "text": text,
            "link_names": true,
        });
        let posted: PostedMessage = self
            .call("chat.postMessage", Payload::Json(&body))
            .await?;
        info!(channel = %posted.channel, ts = %posted.ts, "digest posted");
        Ok(posted)
    }
}
