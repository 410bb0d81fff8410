//! WeChat Official Account adapter.
//!
//! Protocol:
//!
//! 1. `GET /cgi-bin/token` exchanges app id and secret for an access token.
//! 2. The Markdown body is rendered to HTML.
//! 3. `POST /cgi-bin/draft/add` creates a draft article and returns its
//!    `media_id`.
//! 4. Only when `should_publish` is set, `POST /cgi-bin/freepublish/submit`
//!    submits the draft for release and returns a `publish_id`.
//!
//! Leaving `should_publish` unset is a normal outcome: the article stays in
//! the account's draft box. Every reply may carry `errcode`/`errmsg`; a
//! non-zero `errcode` aborts the pipeline.

use async_trait::async_trait;
use mediapost_types::{
    ArtifactIds, Platform, PublishError, PublishRequest, PublishResult, Result,
};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::credentials;
use crate::http::{HttpClient, code_of, id_string};
use crate::markdown;
use crate::traits::Publisher;

/// Digest length WeChat shows under the article title.
const DIGEST_CHARS: usize = 120;

/// Publishes articles to a WeChat Official Account.
#[derive(Debug, Clone)]
pub struct WeChatPublisher {
    http: HttpClient,
    base_url: String,
}

impl WeChatPublisher {
    /// Create an adapter talking to `base_url` (normally
    /// `https://api.weixin.qq.com`).
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }

    async fn access_token(&self, app_id: &str, app_secret: &str) -> Result<String> {
        let request = self
            .http
            .client()
            .get(format!("{}/cgi-bin/token", self.base_url))
            .query(&[
                ("grant_type", "client_credential"),
                ("appid", app_id),
                ("secret", app_secret),
            ]);
        let reply = self
            .http
            .send_json(Platform::WeChat, "wechat token", request)
            .await?;
        check_errcode(&reply.body)?;
        let body = reply.ensure_success()?;

        body.get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| {
                PublishError::InvalidResponse("wechat token: no access_token in reply".into())
            })
    }

    async fn add_draft(&self, token: &str, article: Value) -> Result<String> {
        let request = self
            .http
            .client()
            .post(format!("{}/cgi-bin/draft/add", self.base_url))
            .query(&[("access_token", token)])
            .json(&json!({ "articles": [article] }));
        let reply = self
            .http
            .send_json(Platform::WeChat, "wechat draft", request)
            .await?;
        check_errcode(&reply.body)?;
        let body = reply.ensure_success()?;

        id_string(body.get("media_id")).ok_or_else(|| {
            PublishError::InvalidResponse("wechat draft: no media_id in reply".into())
        })
    }

    async fn submit(&self, token: &str, media_id: &str) -> Result<Option<String>> {
        let request = self
            .http
            .client()
            .post(format!("{}/cgi-bin/freepublish/submit", self.base_url))
            .query(&[("access_token", token)])
            .json(&json!({ "media_id": media_id }));
        let reply = self
            .http
            .send_json(Platform::WeChat, "wechat submit", request)
            .await?;
        check_errcode(&reply.body)?;
        let body = reply.ensure_success()?;
        Ok(id_string(body.get("publish_id")))
    }
}

#[async_trait]
impl Publisher for WeChatPublisher {
    fn platform(&self) -> Platform {
        Platform::WeChat
    }

    async fn try_publish(&self, request: &PublishRequest) -> Result<PublishResult> {
        let creds = credentials::resolve(Platform::WeChat, &request.credentials)?;
        let title = request
            .trimmed_title()
            .ok_or_else(|| PublishError::InvalidArguments("title is required".into()))?;
        if request.content.trim().is_empty() {
            return Err(PublishError::InvalidArguments("content is required".into()));
        }
        let should_publish = request.option_flag("should_publish");

        let token = self
            .access_token(creds.get("app_id"), creds.get("app_secret"))
            .await?;

        let digest = match request.option_str("digest") {
            Some(digest) => markdown::excerpt(digest, DIGEST_CHARS),
            None => markdown::excerpt(&markdown::render_plain(&request.content), DIGEST_CHARS),
        };
        let article = json!({
            "title": title,
            "author": request.option_str("author").unwrap_or_default(),
            "digest": digest,
            "content": markdown::render_for(self.platform(), &request.content),
            "thumb_media_id": request.option_str("thumb_media_id").unwrap_or_default(),
            "need_open_comment": 0,
        });
        let media_id = self.add_draft(&token, article).await?;
        debug!(media_id = %media_id, "wechat draft created");

        if !should_publish {
            return Ok(PublishResult::success(
                "Draft created only (not published). Set should_publish to true to submit it for publishing.",
                ArtifactIds {
                    media_id: Some(media_id),
                    ..Default::default()
                },
            ));
        }

        let publish_id = self
            .submit(&token, &media_id)
            .await
            .map_err(|e| e.with_note(format!("draft {media_id} was created but not submitted")))?;
        info!(media_id = %media_id, publish_id = ?publish_id, "wechat draft submitted");

        Ok(PublishResult::success(
            "Draft created and submitted for publishing",
            ArtifactIds {
                media_id: Some(media_id),
                publish_id,
                ..Default::default()
            },
        ))
    }
}

fn check_errcode(body: &Value) -> Result<()> {
    match code_of(body.get("errcode")) {
        None | Some(0) => Ok(()),
        Some(code) => {
            let message = body
                .get("errmsg")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            Err(PublishError::remote(Platform::WeChat, Some(code), message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errcode_zero_and_absent_pass() {
        assert!(check_errcode(&json!({"access_token": "t"})).is_ok());
        assert!(check_errcode(&json!({"errcode": 0, "errmsg": "ok"})).is_ok());
    }

    #[test]
    fn errcode_nonzero_is_remote_error() {
        let err = check_errcode(&json!({"errcode": 40001, "errmsg": "invalid credential"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "WeChat API error 40001: invalid credential");
    }

    #[test]
    fn base_url_is_normalized() {
        let http = HttpClient::new(&Default::default()).unwrap();
        let publisher = WeChatPublisher::new(http, "https://api.weixin.qq.com/");
        assert_eq!(publisher.base_url, "https://api.weixin.qq.com");
    }
}
