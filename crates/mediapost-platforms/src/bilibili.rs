//! Bilibili column article adapter.
//!
//! The content is rendered to HTML and saved with a single form-encoded
//! `POST /x/article/creative/draft/addupdate`. Authentication is the
//! `SESSDATA`/`bili_jct` cookie pair, and `bili_jct` doubles as the CSRF
//! token in the form body.
//!
//! Bilibili answers HTTP 200 for most failures and reports them through an
//! embedded `code`; any non-zero `code` fails the call.

use async_trait::async_trait;
use mediapost_types::{
    ArtifactIds, Platform, PublishError, PublishRequest, PublishResult, Result,
};
use reqwest::header::COOKIE;
use serde_json::Value;

use crate::credentials;
use crate::http::{HttpClient, code_of, id_string};
use crate::markdown;
use crate::traits::Publisher;

/// Column category used when the caller does not pick one.
pub const DEFAULT_CATEGORY: u64 = 15;

/// Length of the summary shown in article listings.
const SUMMARY_CHARS: usize = 100;

/// Saves column article drafts on Bilibili.
#[derive(Debug, Clone)]
pub struct BilibiliPublisher {
    http: HttpClient,
    base_url: String,
}

impl BilibiliPublisher {
    /// Create an adapter talking to `base_url` (normally
    /// `https://api.bilibili.com`).
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }
}

#[async_trait]
impl Publisher for BilibiliPublisher {
    fn platform(&self) -> Platform {
        Platform::Bilibili
    }

    async fn try_publish(&self, request: &PublishRequest) -> Result<PublishResult> {
        let creds = credentials::resolve(Platform::Bilibili, &request.credentials)?;
        let title = request
            .trimmed_title()
            .ok_or_else(|| PublishError::InvalidArguments("title is required".into()))?;
        let category = request
            .option_u64("category")?
            .unwrap_or(DEFAULT_CATEGORY);

        let html = markdown::render_for(self.platform(), &request.content);
        let plain = markdown::render_plain(&request.content);
        let summary = match request.option_str("summary") {
            Some(summary) => markdown::excerpt(summary, SUMMARY_CHARS),
            None => markdown::excerpt(&plain, SUMMARY_CHARS),
        };
        let words = plain.chars().filter(|c| !c.is_whitespace()).count();
        let csrf = creds.get("bili_jct");

        let form = [
            ("title", title.to_owned()),
            ("content", html),
            ("category", category.to_string()),
            ("summary", summary),
            ("words", words.to_string()),
            ("csrf", csrf.to_owned()),
        ];
        let http_request = self
            .http
            .client()
            .post(format!("{}/x/article/creative/draft/addupdate", self.base_url))
            .header(
                COOKIE,
                format!("SESSDATA={}; bili_jct={}", creds.get("sessdata"), csrf),
            )
            .form(&form);
        let reply = self
            .http
            .send_json(Platform::Bilibili, "bilibili draft", http_request)
            .await?;
        check_code(&reply.body)?;
        let body = reply.ensure_success()?;
        if code_of(body.get("code")).is_none() {
            return Err(PublishError::InvalidResponse(
                "bilibili draft: reply has no code field".into(),
            ));
        }

        let article_id = id_string(body.pointer("/data/aid"));
        Ok(PublishResult::success(
            "Article draft saved to Bilibili",
            ArtifactIds {
                article_id,
                ..Default::default()
            },
        ))
    }
}

fn check_code(body: &Value) -> Result<()> {
    match code_of(body.get("code")) {
        None | Some(0) => Ok(()),
        Some(code) => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            Err(PublishError::remote(Platform::Bilibili, Some(code), message))
        }
    }
}
