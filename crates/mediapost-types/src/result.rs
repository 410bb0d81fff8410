//! The normalized publish result.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, PublishError};

/// Identifiers of the artifact a platform created.
///
/// Which fields are populated depends on the platform; all are optional and
/// omitted from JSON when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactIds {
    /// WeChat draft media id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    /// WeChat free-publish job id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_id: Option<String>,
    /// Douyin video item id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Xiaohongshu note id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
    /// Bilibili article id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    /// Twitter post id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<String>,
    /// Feishu document id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Browser URL of the created artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ArtifactIds {
    /// Returns `true` when no identifier is set.
    pub fn is_empty(&self) -> bool {
        *self == ArtifactIds::default()
    }
}

/// One structured reply per publish call.
///
/// Construct through [`success`](PublishResult::success) or
/// [`failure`](PublishResult::failure) so that a failed result never carries
/// identifiers and a successful one never carries an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    /// Whether the platform accepted the content.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Error description, only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error classification, only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Identifiers of the created artifact, only on success.
    #[serde(flatten)]
    pub ids: ArtifactIds,
}

impl PublishResult {
    /// A successful result.
    pub fn success(message: impl Into<String>, ids: ArtifactIds) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
            error_kind: None,
            ids,
        }
    }

    /// A failed result describing `err`.
    pub fn failure(err: &PublishError) -> Self {
        let description = err.to_string();
        Self {
            success: false,
            message: description.clone(),
            error: Some(description),
            error_kind: Some(err.kind()),
            ids: ArtifactIds::default(),
        }
    }

    /// Whether the success/identifier/error invariants hold.
    pub fn is_consistent(&self) -> bool {
        if self.success {
            self.error.is_none() && self.error_kind.is_none()
        } else {
            self.ids.is_empty() && self.error.is_some()
        }
    }
}

impl From<PublishError> for PublishResult {
    fn from(err: PublishError) -> Self {
        PublishResult::failure(&err)
    }
}
