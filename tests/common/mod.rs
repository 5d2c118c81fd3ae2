#![allow(dead_code, clippy::expect_used)]

use std::path::PathBuf;
use std::time::Duration;

use redmine_digest::config::{Config, RedmineSettings, ReportSettings, SlackSettings};
use redmine_digest::types::Locale;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

pub fn config(redmine: &MockServer, slack: &MockServer) -> Config {
    Config {
        redmine: RedmineSettings {
            endpoint: Url::parse(&redmine.uri()).expect("valid mock url"),
            api_key: SecretString::from("redmine-key"),
            project: "web".to_string(),
            finished_status: vec![5],
            server_side_filter: false,
        },
        slack: SlackSettings {
            token: SecretString::from("xoxb-test"),
            channel: "#dev".to_string(),
            api_base: Url::parse(&slack.uri()).expect("valid mock url"),
        },
        report: ReportSettings {
            locale: Locale::Ja,
            mapping_file: PathBuf::from("does-not-exist/usermapping.json"),
        },
        queue_capacity: 2,
        http_connect_timeout: Duration::from_millis(500),
        http_request_timeout: Duration::from_secs(2),
    }
}

pub fn redmine_user(id: u32, login: &str, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "login": login,
        "firstname": first,
        "lastname": last,
        "mail": format!("{login}@example.com")
    })
}

pub fn issue(id: u32, project: u32, status: u32, due: Option<&str>, assignee: Option<(u32, &str)>) -> Value {
    let mut issue = json!({
        "id": id,
        "project": {"id": project, "name": "Web"},
        "tracker": {"id": 1, "name": "Bug"},
        "status": {"id": status, "name": "New"},
        "subject": format!("Issue {id}"),
    });
    if let Some(due) = due {
        issue["due_date"] = json!(due);
    }
    if let Some((id, name)) = assignee {
        issue["assigned_to"] = json!({"id": id, "name": name});
    }
    issue
}
