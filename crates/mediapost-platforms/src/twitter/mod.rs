//! Twitter / X adapter.
//!
//! Posts text through the v2 `POST /2/tweets` endpoint, signed with OAuth
//! 1.0a user-context credentials. Media attachment would need the separate
//! chunked upload API, so a request carrying `media_urls` is rejected
//! outright instead of posting the text alone.

pub mod oauth;

use async_trait::async_trait;
use mediapost_types::{
    ArtifactIds, Platform, PublishError, PublishRequest, PublishResult, Result,
};
use reqwest::header::AUTHORIZATION;
use serde_json::{Value, json};

use crate::credentials;
use crate::http::{HttpClient, id_string};
use crate::markdown;
use crate::traits::Publisher;

use self::oauth::OAuthKeys;

/// Maximum characters per post for standard accounts.
pub const MAX_POST_CHARS: usize = 280;

/// Posts to Twitter / X.
#[derive(Debug, Clone)]
pub struct TwitterPublisher {
    http: HttpClient,
    base_url: String,
}

impl TwitterPublisher {
    /// Create an adapter talking to `base_url` (normally
    /// `https://api.twitter.com`).
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    async fn try_publish(&self, request: &PublishRequest) -> Result<PublishResult> {
        let creds = credentials::resolve(Platform::Twitter, &request.credentials)?;
        if !request.media_urls.is_empty() {
            return Err(PublishError::Unsupported(
                "Media upload from URLs is not supported for Twitter; post the text without media_urls".into(),
            ));
        }
        let rendered = markdown::render_for(self.platform(), &request.content);
        let text = post_text(&rendered)?;

        let url = format!("{}/2/tweets", self.base_url);
        let keys = OAuthKeys {
            consumer_key: creds.get("app_key"),
            consumer_secret: creds.get("app_secret"),
            token: creds.get("access_token"),
            token_secret: creds.get("access_secret"),
        };
        let authorization = oauth::authorization_header("POST", &url, keys, &[])?;

        let http_request = self
            .http
            .client()
            .post(&url)
            .header(AUTHORIZATION, authorization)
            .json(&json!({ "text": text }));
        let reply = self
            .http
            .send_json(Platform::Twitter, "twitter post", http_request)
            .await?;
        check_errors(&reply.body)?;
        let body = reply.ensure_success()?;

        let tweet_id = id_string(body.pointer("/data/id")).ok_or_else(|| {
            PublishError::InvalidResponse("twitter post: no data.id in reply".into())
        })?;
        let url = format!("https://twitter.com/i/web/status/{tweet_id}");
        Ok(PublishResult::success(
            "Tweet posted",
            ArtifactIds {
                tweet_id: Some(tweet_id),
                url: Some(url),
                ..Default::default()
            },
        ))
    }
}

fn post_text(content: &str) -> Result<&str> {
    let text = content.trim();
    if text.is_empty() {
        return Err(PublishError::InvalidArguments("content is required".into()));
    }
    let chars = text.chars().count();
    if chars > MAX_POST_CHARS {
        return Err(PublishError::InvalidArguments(format!(
            "post is {chars} characters; the limit is {MAX_POST_CHARS}"
        )));
    }
    Ok(text)
}

fn check_errors(body: &Value) -> Result<()> {
    if let Some(first) = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        let message = first
            .get("message")
            .or_else(|| first.get("detail"))
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        let code = first.get("code").and_then(Value::as_i64);
        return Err(PublishError::remote(Platform::Twitter, code, message));
    }
    if let Some(detail) = body.get("detail").and_then(Value::as_str) {
        let code = body.get("status").and_then(Value::as_i64);
        return Err(PublishError::remote(Platform::Twitter, code, detail));
    }
    Ok(())
}
