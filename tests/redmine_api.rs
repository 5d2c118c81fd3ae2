#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::time::Duration;

use redmine_digest::error::{Error, RedmineError};
use redmine_digest::redmine::RedmineClient;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> RedmineClient {
    RedmineClient::new(
        &Url::parse(&server.uri()).expect("valid mock url"),
        SecretString::from("redmine-key"),
        Duration::from_secs(2),
        Duration::from_secs(1),
        true,
    )
    .expect("client")
}

#[tokio::test]
async fn users_follow_offset_pagination() {
    let server = MockServer::start().await;

    let first_page: Vec<_> = (1..=100)
        .map(|id| common::redmine_user(id, &format!("user{id}"), "First", "Last"))
        .collect();
    Mock::given(method("GET"))
        .and(path("/users.json"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "100"))
        .and(header("x-redmine-api-key", "redmine-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": first_page,
            "total_count": 101,
            "offset": 0,
            "limit": 100
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users.json"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [common::redmine_user(101, "last", "Jane", "Doe")],
            "total_count": 101,
            "offset": 100,
            "limit": 100
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = client(&server).users().await.expect("users");
    assert_eq!(users.len(), 101);
    assert_eq!(users[100].login, "last");
    assert_eq!(users[100].lastname, "Doe");
}

#[tokio::test]
async fn empty_page_stops_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [],
            "total_count": 0,
            "offset": 0,
            "limit": 100
        })))
        .expect(1)
        .mount(&server)
        .await;

    let issues = client(&server).issues(None).await.expect("issues");
    assert!(issues.is_empty());
}

#[tokio::test]
async fn server_side_filter_sends_project_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .and(query_param("project_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [common::issue(1, 7, 1, Some("2026-10-20"), None)],
            "total_count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let issues = client(&server).issues(Some(7)).await.expect("issues");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].project.id, 7);
    assert_eq!(
        issues[0].due_date.map(|d| d.to_string()),
        Some("2026-10-20".to_string())
    );
}

#[tokio::test]
async fn project_is_found_by_identifier() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [
                {"id": 1, "name": "Infra", "identifier": "infra"},
                {"id": 2, "name": "Web Site", "identifier": "web"}
            ],
            "total_count": 2
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    assert_eq!(client.find_project("web").await.expect("project").id, 2);
    assert_eq!(client.find_project("1").await.expect("project").name, "Infra");

    let err = client.find_project("mobile").await.expect_err("should fail");
    assert!(matches!(
        err,
        Error::Redmine(RedmineError::ProjectNotFound { .. })
    ));
}

#[tokio::test]
async fn single_user_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/3.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": common::redmine_user(3, "taro", "太郎", "山田")
        })))
        .mount(&server)
        .await;

    let user = client(&server).user(3).await.expect("user");
    assert_eq!(user.login, "taro");
    assert_eq!(user.lastname, "山田");
}

#[tokio::test]
async fn http_errors_surface_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).users().await.expect_err("should fail");
    match err {
        Error::Redmine(RedmineError::HttpStatus { status, .. }) => assert_eq!(status.as_u16(), 403),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn invalid_json_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client(&server).projects().await.expect_err("should fail");
    match err {
        Error::Redmine(RedmineError::Json { message }) => assert!(message.contains("<html>")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn plain_http_requires_insecure() {
    let result = RedmineClient::new(
        &Url::parse("http://redmine.example.com").expect("url"),
        SecretString::from("k"),
        Duration::from_secs(1),
        Duration::from_secs(1),
        false,
    );
    assert!(matches!(result, Err(Error::Config(_))));
}
