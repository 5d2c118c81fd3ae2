use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::{Assignee, Ticket, TrackerUser, parse_due_date};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct IdName {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Project {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub identifier: String,
}

impl Project {
    /// `target` may be the numeric id, the display name or the identifier.
    #[must_use]
    pub fn matches(&self, target: &str) -> bool {
        let target = target.trim();
        self.id.to_string() == target || self.name == target || self.identifier == target
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Issue {
    pub id: u32,
    pub project: IdName,
    pub status: IdName,
    pub subject: String,
    pub due_date: Option<NaiveDate>,
    pub assigned_to: Option<Assignee>,
}

impl From<Issue> for Ticket {
    fn from(value: Issue) -> Self {
        Self {
            id: value.id,
            subject: value.subject,
            due_date: value.due_date,
            assigned_to: value.assigned_to,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawIssue {
    id: u32,
    project: IdName,
    status: IdName,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    assigned_to: Option<Assignee>,
}

impl From<RawIssue> for Issue {
    fn from(value: RawIssue) -> Self {
        let due_date = parse_due_date(value.due_date.as_deref());
        if due_date.is_none() {
            if let Some(raw) = value.due_date.as_deref().filter(|s| !s.trim().is_empty()) {
                tracing::debug!(issue = value.id, due_date = raw, "treating due date as unset");
            }
        }
        Self {
            id: value.id,
            project: value.project,
            status: value.status,
            subject: value.subject,
            due_date,
            assigned_to: value.assigned_to,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUser {
    id: u32,
    #[serde(default)]
    login: String,
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    lastname: String,
}

impl From<RawUser> for TrackerUser {
    fn from(value: RawUser) -> Self {
        Self {
            id: value.id,
            login: value.login,
            firstname: value.firstname,
            lastname: value.lastname,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssuesPage {
    #[serde(default)]
    pub(crate) issues: Vec<RawIssue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersPage {
    #[serde(default)]
    pub(crate) users: Vec<RawUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsPage {
    #[serde(default)]
    pub(crate) projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub(crate) user: RawUser,
}
