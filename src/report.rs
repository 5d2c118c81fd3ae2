use chrono::NaiveDate;

use crate::classify::Classified;
use crate::directory::Directory;
use crate::types::{Bucket, Locale, Ticket, is_unset_date};

/// Renders the digest posted to Slack.
#[derive(Clone, Debug)]
pub struct ReportBuilder {
    issues_base: String,
    project: String,
    locale: Locale,
}

impl ReportBuilder {
    #[must_use]
    pub fn new(endpoint: &str, project: impl Into<String>, locale: Locale) -> Self {
        Self {
            issues_base: format!("{}/issues", endpoint.trim_end_matches('/')),
            project: project.into(),
            locale,
        }
    }

    /// Expired section first, then due-soon, as a single message body.
    #[must_use]
    pub fn render(&self, classified: &Classified, directory: &Directory) -> String {
        let mut out = String::new();
        for bucket in Bucket::ALL {
            out.push_str(&self.section(bucket, classified.bucket(bucket), |ticket| {
                directory.assignee_label(ticket.assigned_to.as_ref())
            }));
        }
        out
    }

    /// One line per ticket followed by the bucket's count line.
    pub fn section<F>(&self, bucket: Bucket, tickets: &[Ticket], mut assignee: F) -> String
    where
        F: FnMut(&Ticket) -> Option<String>,
    {
        let mut out = String::new();
        for ticket in tickets {
            let label = assignee(ticket);
            out.push_str(&self.ticket_line(ticket, label.as_deref()));
            out.push('\n');
        }
        out.push_str(&self.summary_line(bucket, tickets.len()));
        out.push('\n');
        out
    }

    #[must_use]
    pub fn ticket_line(&self, ticket: &Ticket, assignee: Option<&str>) -> String {
        let due = format_due(ticket.due_date);
        let due = or_placeholder(due.as_deref(), self.due_placeholder());
        let assignee = or_placeholder(assignee, self.assignee_placeholder());
        format!(
            "- {due} <{base}/{id}|#{id}>: {subject}({assignee})",
            base = self.issues_base,
            id = ticket.id,
            subject = escape_mrkdwn(&ticket.subject),
        )
    }

    #[must_use]
    pub fn summary_line(&self, bucket: Bucket, count: usize) -> String {
        let project = &self.project;
        match (self.locale, bucket) {
            (Locale::Ja, Bucket::Expired) => {
                format!("{project} の期限切れのチケットは *{count}件* です")
            }
            (Locale::Ja, Bucket::DueSoon) => {
                format!("{project} の期限切れが近いチケットは *{count}件* です")
            }
            (Locale::En, Bucket::Expired) => format!("{project}: *{count}* tickets are overdue"),
            (Locale::En, Bucket::DueSoon) => format!("{project}: *{count}* tickets are due soon"),
        }
    }

    const fn due_placeholder(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "期日未設定",
            Locale::En => "due date not set",
        }
    }

    const fn assignee_placeholder(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "担当未設定",
            Locale::En => "assignee not set",
        }
    }
}

/// Escape the three characters Slack treats as control sequences in message
/// text. Mentions and links built by this module must not go through it.
#[must_use]
pub fn escape_mrkdwn(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Count carried by a line produced by [`ReportBuilder::summary_line`].
#[must_use]
pub fn parse_summary_count(line: &str) -> Option<usize> {
    let start = line.find('*')? + 1;
    let len = line[start..].find('*')?;
    let digits: String = line[start..start + len]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn format_due(date: Option<NaiveDate>) -> Option<String> {
    date.filter(|d| !is_unset_date(*d))
        .map(|d| d.format("%Y-%m-%d").to_string())
}

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}
