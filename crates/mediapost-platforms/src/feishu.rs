//! Feishu / Lark Docx adapter.
//!
//! Protocol:
//!
//! 1. `POST /open-apis/auth/v3/tenant_access_token/internal` exchanges app
//!    id and secret for a tenant access token.
//! 2. `POST /open-apis/docx/v1/documents` creates an empty document with
//!    the title.
//! 3. `POST /open-apis/docx/v1/documents/{id}/blocks/{id}/children`
//!    appends the body as plain-text paragraph blocks, one per source
//!    block, in batches.
//!
//! Markdown formatting is not translated into Docx block types. Once the
//! document exists the call counts as a success; if step 3 fails the
//! message says the content could not be added.

use async_trait::async_trait;
use mediapost_types::{
    ArtifactIds, Platform, PublishError, PublishRequest, PublishResult, Result,
};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::credentials;
use crate::http::{HttpClient, code_of, id_string};
use crate::markdown::plain;
use crate::traits::Publisher;

/// Docx block type of a text paragraph.
const TEXT_BLOCK: u64 = 2;

/// Most children the block API accepts per request.
const MAX_CHILDREN_PER_CALL: usize = 50;

/// Creates documents in Feishu Docx.
#[derive(Debug, Clone)]
pub struct FeishuPublisher {
    http: HttpClient,
    base_url: String,
    web_url: String,
}

impl FeishuPublisher {
    /// Create an adapter talking to the open API at `base_url`, building
    /// document links under `web_url` (normally `https://feishu.cn`).
    pub fn new(http: HttpClient, base_url: impl Into<String>, web_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            web_url: web_url.into().trim_end_matches('/').to_owned(),
        }
    }

    async fn tenant_token(&self, app_id: &str, app_secret: &str) -> Result<String> {
        let request = self
            .http
            .client()
            .post(format!(
                "{}/open-apis/auth/v3/tenant_access_token/internal",
                self.base_url
            ))
            .json(&json!({ "app_id": app_id, "app_secret": app_secret }));
        let reply = self
            .http
            .send_json(Platform::Feishu, "feishu token", request)
            .await?;
        check_code(&reply.body)?;
        let body = reply.ensure_success()?;

        body.get("tenant_access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| {
                PublishError::InvalidResponse("feishu token: no tenant_access_token in reply".into())
            })
    }

    async fn create_document(&self, token: &str, title: &str) -> Result<String> {
        let request = self
            .http
            .client()
            .post(format!("{}/open-apis/docx/v1/documents", self.base_url))
            .bearer_auth(token)
            .json(&json!({ "title": title }));
        let reply = self
            .http
            .send_json(Platform::Feishu, "feishu create document", request)
            .await?;
        check_code(&reply.body)?;
        let body = reply.ensure_success()?;

        id_string(body.pointer("/data/document/document_id")).ok_or_else(|| {
            PublishError::InvalidResponse("feishu create document: no document_id in reply".into())
        })
    }

    /// Append `blocks` under the document's root block. Returns how many
    /// were added before the first failure, alongside that failure.
    async fn append_blocks(
        &self,
        token: &str,
        document_id: &str,
        blocks: &[String],
    ) -> (usize, Option<PublishError>) {
        let url = format!(
            "{}/open-apis/docx/v1/documents/{document_id}/blocks/{document_id}/children",
            self.base_url
        );
        let mut added = 0;
        for batch in blocks.chunks(MAX_CHILDREN_PER_CALL) {
            let children: Vec<Value> = batch.iter().map(|text| text_block(text)).collect();
            let request = self
                .http
                .client()
                .post(&url)
                .bearer_auth(token)
                .json(&json!({ "children": children }));

            let outcome = match self
                .http
                .send_json(Platform::Feishu, "feishu add blocks", request)
                .await
            {
                Ok(reply) => check_code(&reply.body).and_then(|()| reply.ensure_success()),
                Err(e) => Err(e),
            };
            if let Err(e) = outcome {
                return (added, Some(e));
            }
            added += batch.len();
        }
        (added, None)
    }
}

#[async_trait]
impl Publisher for FeishuPublisher {
    fn platform(&self) -> Platform {
        Platform::Feishu
    }

    async fn try_publish(&self, request: &PublishRequest) -> Result<PublishResult> {
        let creds = credentials::resolve(Platform::Feishu, &request.credentials)?;
        let title = request
            .trimmed_title()
            .ok_or_else(|| PublishError::InvalidArguments("title is required".into()))?;

        let token = self
            .tenant_token(creds.get("app_id"), creds.get("app_secret"))
            .await?;
        let document_id = self.create_document(&token, title).await?;
        debug!(document_id = %document_id, "feishu document created");

        let blocks = plain::blocks(&request.content);
        let message = if blocks.is_empty() {
            "Document created in Feishu with an empty body".to_owned()
        } else {
            match self.append_blocks(&token, &document_id, &blocks).await {
                (added, None) => format!(
                    "Document created in Feishu with {added} plain-text blocks; Markdown formatting was not preserved"
                ),
                (added, Some(err)) => {
                    warn!(document_id = %document_id, added, error = %err, "feishu content population failed");
                    format!(
                        "Document created in Feishu, but content could not be added ({added} of {} blocks written): {err}",
                        blocks.len()
                    )
                }
            }
        };

        let url = format!("{}/docx/{document_id}", self.web_url);
        Ok(PublishResult::success(
            message,
            ArtifactIds {
                document_id: Some(document_id),
                url: Some(url),
                ..Default::default()
            },
        ))
    }
}

fn text_block(text: &str) -> Value {
    json!({
        "block_type": TEXT_BLOCK,
        "text": {
            "elements": [{ "text_run": { "content": text } }]
        }
    })
}

fn check_code(body: &Value) -> Result<()> {
    match code_of(body.get("code")) {
        None | Some(0) => Ok(()),
        Some(code) => {
            let message = body
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            Err(PublishError::remote(Platform::Feishu, Some(code), message))
        }
    }
}
