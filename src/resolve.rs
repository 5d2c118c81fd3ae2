//! Matching a Redmine user to a Slack account.
//!
//! Each Slack user is tried in list order and the first match wins. A Slack
//! user matches when
//!
//! 1. its `name` equals the Redmine login, or
//! 2. its real name, with full-width spaces (U+3000) normalised, equals one of
//!    `last+first`, `last first`, `first+last`, `first last`, or
//! 3. the mapping table has an entry for its real name and, after replacing the
//!    real name with the mapped value, step 1 or 2 matches.
//!
//! Step 3 substitutes exactly once; a mapped value is never looked up again.

use crate::mapping::UserMapping;
use crate::types::{ChatUser, TrackerUser};

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Find the Slack user for `tracker`. Neither input is modified.
#[must_use]
pub fn resolve<'a>(
    tracker: &TrackerUser,
    chat_users: &'a [ChatUser],
    mapping: &UserMapping,
) -> Option<&'a ChatUser> {
    chat_users
        .iter()
        .find(|chat| is_same_user(tracker, chat, mapping))
}

/// Direct match, then a single mapping substitution and retry.
#[must_use]
pub fn is_same_user(tracker: &TrackerUser, chat: &ChatUser, mapping: &UserMapping) -> bool {
    if matches_directly(tracker, &chat.name, &chat.real_name) {
        return true;
    }
    mapping
        .get(&chat.real_name)
        .is_some_and(|mapped| matches_directly(tracker, &chat.name, mapped))
}

fn matches_directly(tracker: &TrackerUser, chat_name: &str, real_name: &str) -> bool {
    if tracker.login == chat_name {
        return true;
    }
    let real_name = normalize_spaces(real_name);
    full_name_variants(tracker)
        .iter()
        .any(|variant| *variant == real_name)
}

fn normalize_spaces(name: &str) -> String {
    name.replace(IDEOGRAPHIC_SPACE, " ")
}

fn full_name_variants(user: &TrackerUser) -> [String; 4] {
    let (first, last) = (&user.firstname, &user.lastname);
    [
        format!("{last}{first}"),
        format!("{last} {first}"),
        format!("{first}{last}"),
        format!("{first} {last}"),
    ]
}
