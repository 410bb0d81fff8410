//! Shared HTTP plumbing for the platform adapters.
//!
//! One [`HttpClient`] is built from [`GatewayConfig`] and cloned into every
//! adapter; clones share the underlying connection pool. Each request is
//! bounded by the configured per-call timeout, and a timeout surfaces as
//! [`PublishError::Timeout`] rather than a hang.
//!
//! Platforms report most failures inside a JSON body, sometimes alongside
//! a non-2xx status. [`HttpClient::send_json`] therefore returns any reply
//! whose body parses as JSON, and adapters inspect the embedded status
//! before calling [`JsonReply::ensure_success`].

use std::time::Duration;

use mediapost_types::{GatewayConfig, Platform, PublishError, Result};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

/// Longest body excerpt quoted in a transport error.
const BODY_EXCERPT_CHARS: usize = 200;

/// A configured HTTP client shared by all adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// Build a client with the timeout and user agent from `config`.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let timeout = config.timeout();
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| PublishError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { inner, timeout })
    }

    /// The underlying reqwest client, for building requests.
    pub fn client(&self) -> &reqwest::Client {
        &self.inner
    }

    /// The per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `request` and parse the reply body as JSON.
    ///
    /// `platform` tags every log line for this call; `step` names the
    /// protocol step for logs and error messages (e.g. `"wechat token"`).
    ///
    /// # Errors
    ///
    /// - [`PublishError::Timeout`] if the call exceeded the deadline.
    /// - [`PublishError::Transport`] for connection failures, and for
    ///   non-2xx replies whose body is not JSON.
    /// - [`PublishError::InvalidResponse`] for a 2xx reply that is not JSON.
    pub async fn send_json(
        &self,
        platform: Platform,
        step: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<JsonReply> {
        debug!(%platform, step, "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| classify(platform, step, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify(platform, step, e))?;

        debug!(
            %platform,
            step,
            status = status.as_u16(),
            bytes = text.len(),
            "response received"
        );

        match serde_json::from_str::<Value>(&text) {
            Ok(body) => Ok(JsonReply {
                step: step.to_owned(),
                status,
                body,
            }),
            Err(_) if status.is_success() => Err(PublishError::InvalidResponse(format!(
                "{step}: expected a JSON body, got: {}",
                excerpt(&text)
            ))),
            Err(_) => {
                warn!(%platform, step, status = status.as_u16(), "non-JSON error reply");
                Err(PublishError::Transport(format!(
                    "{step}: HTTP {status}: {}",
                    excerpt(&text)
                )))
            }
        }
    }
}

/// A reply whose body parsed as JSON.
#[derive(Debug, Clone)]
pub struct JsonReply {
    step: String,
    /// Transport-level status.
    pub status: StatusCode,
    /// Parsed body.
    pub body: Value,
}

impl JsonReply {
    /// The body, if the transport status was 2xx.
    ///
    /// Call this after checking the platform's embedded status so that an
    /// embedded error message wins over a bare HTTP status.
    pub fn ensure_success(self) -> Result<Value> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(PublishError::Transport(format!(
                "{}: HTTP {}: {}",
                self.step,
                self.status,
                excerpt(&self.body.to_string())
            )))
        }
    }
}

fn classify(platform: Platform, step: &str, err: reqwest::Error) -> PublishError {
    if err.is_timeout() {
        warn!(%platform, step, "request timed out");
        PublishError::Timeout {
            operation: step.to_owned(),
        }
    } else {
        warn!(%platform, step, error = %err, "request failed");
        PublishError::Transport(format!("{step}: {err}"))
    }
}

fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
    if text.chars().count() > BODY_EXCERPT_CHARS {
        out.push_str("...");
    }
    out
}

/// Read a JSON value as a string identifier.
///
/// Platforms are inconsistent about numeric vs string ids; both are
/// accepted and rendered as a string.
pub fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read an embedded numeric status code, tolerating numeric strings.
pub fn code_of(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
