use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::Result;
use crate::error::{ConfigError, Error, RedmineError};

const API_KEY_HEADER: &str = "x-redmine-api-key";
const CORRELATION_HEADER: &str = "x-correlation-id";
const BODY_PREVIEW_LIMIT: usize = 256;

#[derive(Clone)]
pub struct RedmineClient {
    http: reqwest::Client,
    base: String,
    api_key: SecretString,
}

impl RedmineClient {
    /// Build a `RedmineClient` for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTPS is required but the URL uses HTTP, or if the
    /// underlying HTTP client fails to build.
    pub fn new(
        endpoint: &Url,
        api_key: SecretString,
        timeout: Duration,
        connect_timeout: Duration,
        insecure_http: bool,
    ) -> Result<Self> {
        if endpoint.scheme() != "https" && !insecure_http {
            return Err(Error::Config(ConfigError::InvalidField {
                field: "redmine.endpoint",
                message: "only https URLs are accepted without --insecure".to_string(),
            }));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(concat!("redmine-digest/", env!("CARGO_PKG_VERSION")));
        if !insecure_http {
            builder = builder.https_only(true);
        }
        let http = builder
            .build()
            .map_err(|err| RedmineError::Client { source: err })?;

        Ok(Self {
            http,
            base: endpoint.as_str().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Base URL without trailing slash, as used in issue links.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    pub(super) async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let correlation_id = Uuid::now_v7().to_string();
        let started = Instant::now();
        let url = format!("{}/{}", self.base, path.trim_start_matches('/'));

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .header(CORRELATION_HEADER, &correlation_id)
            .query(query)
            .send()
            .await
            .map_err(RedmineError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RedmineError::HttpStatus {
                path: path.to_string(),
                status,
            }
            .into());
        }

        let body = response.bytes().await.map_err(RedmineError::from)?;
        let value = serde_json::from_slice(&body).map_err(|err| {
            let mut message = format!("error decoding {path}: {err}; body preview: ");
            message.push_str(&body_preview(&body));
            RedmineError::Json { message }
        })?;

        debug!(
            path,
            %correlation_id,
            latency_ms = started.elapsed().as_millis(),
            "redmine call succeeded"
        );
        Ok(value)
    }
}

pub(crate) fn body_preview(body: &[u8]) -> String {
    if body.is_empty() {
        return "<empty>".to_string();
    }
    let end = body.len().min(BODY_PREVIEW_LIMIT);
    let mut preview = String::from_utf8_lossy(&body[..end]).to_string();
    if body.len() > BODY_PREVIEW_LIMIT {
        preview.push_str("...");
    }
    preview.replace('\n', "\\n")
}
