//! Shared HTTP client for the outbound APIs.

use super::resilient_http::{HttpPolicy, resilient_get};
use crate::Result;
use chrono::{DateTime, Utc};
use ohno::{EnrichableExt, IntoAppError};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "    client";

const USER_AGENT: &str = concat!("seo-docs/", env!("CARGO_PKG_VERSION"));

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// HTTP client with a user agent, an optional token and a retry policy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    policy: HttpPolicy,
}

impl ApiClient {
    /// Create a client that authenticates every request with `token` when given.
    pub fn new(token: Option<&str>, policy: HttpPolicy) -> Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut client_builder = reqwest::Client::builder().user_agent(USER_AGENT);

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            policy,
        })
    }

    /// The same client with a different retry policy.
    #[must_use]
    pub fn with_policy(&self, policy: HttpPolicy) -> Self {
        Self {
            client: self.client.clone(),
            policy,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &HttpPolicy {
        &self.policy
    }

    /// GET `url`, failing on any non-success status.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let resp = resilient_get(&self.client, url, &self.policy)
            .await
            .map_err(|e| e.enrich_with(|| format!("GET {url}")))?;

        if let Some(rate_limit) = extract_rate_limit_from_headers(resp.headers())
            && rate_limit.remaining == 0
        {
            log::warn!(target: LOG_TARGET, "Rate limit exhausted for {url}, resets at {}", rate_limit.reset_at);
        }

        resp.error_for_status().into_app_err_with(|| format!("GET {url}"))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get(url)
            .await?
            .json::<T>()
            .await
            .into_app_err_with(|| format!("decoding JSON from {url}"))
    }

    pub async fn get_text(&self, url: &str) -> Result<String> {
        self.get(url)
            .await?
            .text()
            .await
            .into_app_err_with(|| format!("reading body of {url}"))
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use reqwest::header::HeaderValue;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_extract_rate_limit_from_headers() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert("x-ratelimit-remaining", HeaderValue::from_static("42"));
        let _ = headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));

        let info = extract_rate_limit_from_headers(&headers).unwrap();
        assert_eq!(info.remaining, 42);
        assert_eq!(info.reset_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_extract_rate_limit_missing_headers() {
        let mut headers = HeaderMap::new();
        assert!(extract_rate_limit_from_headers(&headers).is_none());

        let _ = headers.insert("x-ratelimit-remaining", HeaderValue::from_static("not-a-number"));
        let _ = headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));
        assert!(extract_rate_limit_from_headers(&headers).is_none());
    }

    #[tokio::test]
    async fn test_token_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget"))
            .and(header("authorization", "token secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "stargazers_count": 3 })))
            .mount(&server)
            .await;

        let client = ApiClient::new(Some("secret"), HttpPolicy::default()).unwrap();
        let body: serde_json::Value = client
            .get_json(&format!("{}/repos/acme/widget", server.uri()))
            .await
            .unwrap();
        assert_eq!(body["stargazers_count"], 3);
    }

    #[tokio::test]
    async fn test_error_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let client = ApiClient::new(None, HttpPolicy::single_attempt(Duration::from_secs(5))).unwrap();
        let err = client.get_text(&format!("{}/gone", server.uri())).await.unwrap_err();
        assert!(format!("{err:#}").contains("/gone"));
    }
}
