//! Douyin adapter.
//!
//! Only the final metadata-attach step is implemented: `POST /video/create/`
//! binds caption text to a video that the caller has already uploaded and
//! identifies by `video_id`. Binary upload is not performed, so a request
//! without `video_id` fails before any network call.

use async_trait::async_trait;
use mediapost_types::{
    ArtifactIds, Platform, PublishError, PublishRequest, PublishResult, Result,
};
use serde_json::{Value, json};

use crate::credentials;
use crate::http::{HttpClient, code_of, id_string};
use crate::markdown;
use crate::traits::Publisher;

/// Publishes captions for pre-uploaded Douyin videos.
#[derive(Debug, Clone)]
pub struct DouyinPublisher {
    http: HttpClient,
    base_url: String,
}

impl DouyinPublisher {
    /// Create an adapter talking to `base_url` (normally
    /// `https://open.douyin.com`).
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }
}

#[async_trait]
impl Publisher for DouyinPublisher {
    fn platform(&self) -> Platform {
        Platform::Douyin
    }

    async fn try_publish(&self, request: &PublishRequest) -> Result<PublishResult> {
        let creds = credentials::resolve(Platform::Douyin, &request.credentials)?;
        let video_id = required_video_id(request)?;
        let access_token = creds.get("access_token");
        let text = markdown::render_for(self.platform(), &request.content);

        let http_request = self
            .http
            .client()
            .post(format!("{}/video/create/", self.base_url))
            .query(&[("open_id", creds.get("open_id"))])
            .bearer_auth(access_token)
            .header("access-token", access_token)
            .json(&json!({
                "video_id": video_id,
                "text": text,
            }));
        let reply = self
            .http
            .send_json(Platform::Douyin, "douyin create", http_request)
            .await?;
        check_error_code(&reply.body)?;
        let body = reply.ensure_success()?;

        let item_id = id_string(body.pointer("/data/item_id"));
        Ok(PublishResult::success(
            "Video published to Douyin",
            ArtifactIds {
                item_id,
                ..Default::default()
            },
        ))
    }
}

fn required_video_id(request: &PublishRequest) -> Result<&str> {
    match request.option_str("video_id") {
        Some(id) => Ok(id),
        None if !request.media_urls.is_empty() => Err(PublishError::Unsupported(
            "Video upload from media_urls is not supported; upload the video to Douyin first and pass its video_id".into(),
        )),
        None => Err(PublishError::Unsupported(
            "video_id is required: binary video upload is not supported, pass the id of an already uploaded video".into(),
        )),
    }
}

fn check_error_code(body: &Value) -> Result<()> {
    let data = body.get("data");
    match code_of(data.and_then(|d| d.get("error_code"))) {
        None | Some(0) => Ok(()),
        Some(code) => {
            let message = data
                .and_then(|d| d.get("description"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("unknown error");
            Err(PublishError::remote(Platform::Douyin, Some(code), message))
        }
    }
}
