use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::Result;
use crate::error::SlackError;
use crate::redmine::client::body_preview;

const CORRELATION_HEADER: &str = "x-correlation-id";

/// Minimal Slack Web API client: every method answers with an `ok` envelope.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    api_base: String,
    token: SecretString,
}

pub(super) enum Payload<'a, B: Serialize> {
    Query(&'a [(&'a str, String)]),
    Json(&'a B),
}

impl SlackClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(
        api_base: &Url,
        token: SecretString,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(concat!("redmine-digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| SlackError::Client { source: err })?;

        Ok(Self {
            http,
            api_base: api_base.as_str().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub(super) async fn call<T, B>(&self, method: &'static str, payload: Payload<'_, B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let correlation_id = Uuid::now_v7().to_string();
        let started = Instant::now();
        let url = format!("{}/{method}", self.api_base);

        let request = match payload {
            Payload::Query(query) => self.http.get(&url).query(query),
            Payload::Json(body) => self.http.post(&url).json(body),
        };
        let response = request
            .bearer_auth(self.token.expose_secret())
            .header(CORRELATION_HEADER, &correlation_id)
            .send()
            .await
            .map_err(SlackError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SlackError::HttpStatus { method, status }.into());
        }

        let body = response.bytes().await.map_err(SlackError::from)?;
        let envelope: Value = serde_json::from_slice(&body).map_err(|err| json_error(method, &err, &body))?;

        if envelope.get("ok").and_then(Value::as_bool) != Some(true) {
            let error = envelope
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(SlackError::Api { method, error }.into());
        }

        let value = serde_json::from_value(envelope).map_err(|err| SlackError::Json {
            message: format!("error decoding {method}: {err}"),
        })?;
        debug!(
            method,
            %correlation_id,
            latency_ms = started.elapsed().as_millis(),
            "slack call succeeded"
        );
        Ok(value)
    }
}

fn json_error(method: &str, err: &serde_json::Error, body: &[u8]) -> SlackError {
    let mut message = format!("error decoding {method}: {err}; body preview: ");
    message.push_str(&body_preview(body));
    SlackError::Json { message }
}
