use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reference to the Redmine user a ticket is assigned to, as embedded in the
/// issue payload.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Assignee {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ticket {
    pub id: u32,
    pub subject: String,
    /// `None` when Redmine has no due date or it cannot be parsed.
    pub due_date: Option<NaiveDate>,
    pub assigned_to: Option<Assignee>,
}

/// Parse a Redmine `YYYY-MM-DD` due date; blanks, garbage and the zero date
/// all map to `None`.
#[must_use]
pub fn parse_due_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|date| !is_unset_date(*date))
}

/// `0001-01-01` is the zero date some Redmine clients emit for "no due date".
#[must_use]
pub fn is_unset_date(date: NaiveDate) -> bool {
    date.year() == 1 && date.ordinal() == 1
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrackerUser {
    pub id: u32,
    pub login: String,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChatUser {
    /// Opaque Slack id used in `<@ID>` mentions.
    pub id: String,
    pub name: String,
    pub real_name: String,
}

impl ChatUser {
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Bucket {
    Expired,
    DueSoon,
}

impl Bucket {
    pub const ALL: [Self; 2] = [Self::Expired, Self::DueSoon];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::DueSoon => "due_soon",
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja_jp" | "japanese" => Ok(Self::Ja),
            "en" | "en_us" | "english" => Ok(Self::En),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}
