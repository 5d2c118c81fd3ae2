use std::sync::Arc;

use tracing::{info, warn};

use crate::Result;
use crate::calendar::Calendar;
use crate::classify::classify_concurrent;
use crate::config::Config;
use crate::directory::Directory;
use crate::mapping::UserMapping;
use crate::redmine::{Issue, Project, RedmineClient};
use crate::report::ReportBuilder;
use crate::slack::{PostedMessage, SlackClient};
use crate::types::Ticket;

#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    /// Accept a plain `http://` Redmine endpoint.
    pub insecure_http: bool,
    /// Render the digest without posting it.
    pub dry_run: bool,
}

#[derive(Clone, Debug)]
pub struct Outcome {
    pub message: String,
    pub expired: usize,
    pub due_soon: usize,
    /// `None` on a dry run.
    pub posted: Option<PostedMessage>,
}

/// Fetch, classify, render and post one digest. Any remote failure aborts the
/// run before anything is posted.
///
/// # Errors
///
/// Returns the first Redmine or Slack failure, or a configuration error when a
/// client cannot be built.
pub async fn run(config: &Config, calendar: Calendar, options: RunOptions) -> Result<Outcome> {
    let redmine = RedmineClient::new(
        &config.redmine.endpoint,
        config.redmine.api_key.clone(),
        config.http_request_timeout,
        config.http_connect_timeout,
        options.insecure_http,
    )?;
    let slack = SlackClient::new(
        &config.slack.api_base,
        config.slack.token.clone(),
        config.http_request_timeout,
        config.http_connect_timeout,
    )?;

    slack.auth_test().await?;
    let chat_users = slack.users().await?;
    let tracker_users = redmine.users().await?;
    let project = redmine.find_project(&config.redmine.project).await?;
    info!(project_id = project.id, project = %project.name, "target project resolved");

    let directory = Directory::new(
        tracker_users,
        chat_users,
        UserMapping::load(&config.report.mapping_file),
    );

    let server_scope = config.redmine.server_side_filter.then_some(project.id);
    let issues = redmine.issues(server_scope).await?;
    let tickets = scope_issues(issues, &project, &config.redmine.finished_status);

    let classified =
        classify_concurrent(Arc::from(tickets), calendar, config.queue_capacity).await;
    if classified.unset > 0 {
        warn!(count = classified.unset, "tickets without due date left out of the digest");
    }
    info!(
        today = %calendar.today,
        week_boundary = %calendar.week_boundary,
        expired = classified.expired.len(),
        due_soon = classified.due_soon.len(),
        "tickets classified"
    );

    let message = ReportBuilder::new(redmine.base(), project.name.as_str(), config.report.locale)
        .render(&classified, &directory);

    let posted = if options.dry_run {
        info!(channel = %config.slack.channel, "dry-run: digest not posted");
        None
    } else {
        Some(slack.post_message(&config.slack.channel, &message).await?)
    };

    Ok(Outcome {
        message,
        expired: classified.expired.len(),
        due_soon: classified.due_soon.len(),
        posted,
    })
}

/// Keep open issues of `project` whose status is not a finished one.
#[must_use]
pub fn scope_issues(issues: Vec<Issue>, project: &Project, finished: &[u32]) -> Vec<Ticket> {
    let total = issues.len();
    let tickets: Vec<Ticket> = issues
        .into_iter()
        .filter(|issue| issue.project.id == project.id)
        .filter(|issue| !finished.contains(&issue.status.id))
        .map(Ticket::from)
        .collect();
    info!(
        kept = tickets.len(),
        dropped = total - tickets.len(),
        "issues scoped to project"
    );
    tickets
}
