#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use redmine_digest::error::{Error, SlackError};
use redmine_digest::slack::SlackClient;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SlackClient {
    SlackClient::new(
        &Url::parse(&server.uri()).expect("valid mock url"),
        SecretString::from("xoxb-test"),
        Duration::from_secs(2),
        Duration::from_secs(1),
    )
    .expect("client")
}

#[tokio::test]
async fn auth_test_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth.test"))
        .and(header("authorization", "Bearer xoxb-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "url": "https://example.slack.com/",
            "team": "Example",
            "user": "digest",
            "user_id": "UBOT"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let identity = client(&server).auth_test().await.expect("auth");
    assert_eq!(identity.user_id, "UBOT");
    assert_eq!(identity.team.as_deref(), Some("Example"));
}

#[tokio::test]
async fn auth_failure_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error": "invalid_auth"
        })))
        .mount(&server)
        .await;

    let err = client(&server).auth_test().await.expect_err("should fail");
    match err {
        Error::Slack(SlackError::Api { method, error }) => {
            assert_eq!(method, "auth.test");
            assert_eq!(error, "invalid_auth");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn users_list_follows_cursor_and_skips_bots() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users.list"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "members": [
                {"id": "U3", "name": "gone", "real_name": "Gone", "deleted": true},
                {"id": "U4", "name": "taro", "real_name": "山田　太郎"}
            ],
            "response_metadata": {"next_cursor": ""}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users.list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "members": [
                {"id": "U1", "name": "jdoe", "real_name": "Jane Doe"},
                {"id": "B1", "name": "builder", "real_name": "CI", "is_bot": true}
            ],
            "response_metadata": {"next_cursor": "page2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = client(&server).users().await.expect("users");
    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["U1", "U4"]);
    assert_eq!(users[1].real_name, "山田　太郎");
}

#[tokio::test]
async fn post_message_links_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(body_partial_json(json!({
            "channel": "#dev",
            "text": "hello <@U1>",
            "link_names": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channel": "C024BE91L",
            "ts": "1729500000.000100"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let posted = client(&server)
        .post_message("#dev", "hello <@U1>")
        .await
        .expect("posted");
    assert_eq!(posted.channel, "C024BE91L");
    assert_eq!(posted.ts, "1729500000.000100");
}

#[tokio::test]
async fn rate_limit_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .post_message("#dev", "hi")
        .await
        .expect_err("should fail");
    assert!(matches!(
        err,
        Error::Slack(SlackError::HttpStatus { method: "chat.postMessage", .. })
    ));
}
