//! Xiaohongshu adapter.
//!
//! A single `POST /api/sns/v1/note` call with a bearer token. The endpoint
//! may additionally demand request signatures this adapter cannot produce;
//! such rejections come back as ordinary remote or transport failures.

use async_trait::async_trait;
use mediapost_types::{
    ArtifactIds, Platform, PublishError, PublishRequest, PublishResult, Result,
};
use serde_json::{Value, json};

use crate::credentials;
use crate::http::{HttpClient, code_of, id_string};
use crate::markdown;
use crate::traits::Publisher;

/// Publishes image notes to Xiaohongshu.
#[derive(Debug, Clone)]
pub struct XiaohongshuPublisher {
    http: HttpClient,
    base_url: String,
}

impl XiaohongshuPublisher {
    /// Create an adapter talking to `base_url`.
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }
}

#[async_trait]
impl Publisher for XiaohongshuPublisher {
    fn platform(&self) -> Platform {
        Platform::Xiaohongshu
    }

    async fn try_publish(&self, request: &PublishRequest) -> Result<PublishResult> {
        let creds = credentials::resolve(Platform::Xiaohongshu, &request.credentials)?;
        let title = request
            .trimmed_title()
            .ok_or_else(|| PublishError::InvalidArguments("title is required".into()))?;

        let http_request = self
            .http
            .client()
            .post(format!("{}/api/sns/v1/note", self.base_url))
            .bearer_auth(creds.get("access_token"))
            .json(&json!({
                "title": title,
                "desc": markdown::render_for(self.platform(), &request.content),
                "image_urls": request.media_urls,
                "type": "normal",
            }));
        let reply = self
            .http
            .send_json(Platform::Xiaohongshu, "xiaohongshu note", http_request)
            .await?;
        check_status(&reply.body)?;
        let body = reply.ensure_success()?;

        let note_id = id_string(body.pointer("/data/note_id"))
            .or_else(|| id_string(body.pointer("/data/id")));
        Ok(PublishResult::success(
            "Note published to Xiaohongshu",
            ArtifactIds {
                note_id,
                ..Default::default()
            },
        ))
    }
}

fn check_status(body: &Value) -> Result<()> {
    let code = code_of(body.get("code"));
    let rejected = body.get("success").and_then(Value::as_bool) == Some(false)
        || code.is_some_and(|c| c != 0);
    if !rejected {
        return Ok(());
    }
    let message = ["msg", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .filter(|m| !m.is_empty())
        .unwrap_or("request rejected");
    Err(PublishError::remote(Platform::Xiaohongshu, code, message))
}
