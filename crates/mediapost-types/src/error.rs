//! Error types for publishing.
//!
//! Every adapter failure is a [`PublishError`]. Callers rarely match on the
//! variants directly; [`PublishError::kind`] folds them into the four kinds
//! the gateway reports ([`ErrorKind`]), and
//! [`PublishResult::failure`](crate::result::PublishResult::failure) renders
//! any of them into a normal `success: false` reply.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::Platform;

/// Coarse classification of a publish failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing credentials or malformed arguments. Never reaches the network.
    Validation,
    /// Network failure, timeout, or a non-2xx reply without a usable body.
    Transport,
    /// The platform answered but rejected the call (embedded status/error).
    RemoteProtocol,
    /// The caller asked for something deliberately out of scope.
    UnsupportedOperation,
    /// An adapter fault the gateway caught at its boundary.
    Internal,
}

/// Errors produced while publishing to a platform.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PublishError {
    /// One or more required credential fields are absent or blank.
    #[error("Missing {platform} {}", .fields.join(" or "))]
    MissingCredentials {
        /// Platform whose adapter rejected the bag.
        platform: Platform,
        /// The missing field names, in declaration order.
        fields: Vec<String>,
    },

    /// Tool arguments are malformed or a required argument is missing.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The HTTP request could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A remote call exceeded the per-call deadline.
    #[error("request timed out: {operation}")]
    Timeout {
        /// The protocol step that timed out (e.g. `"wechat token"`).
        operation: String,
    },

    /// The platform replied with a body that could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The platform rejected the call via an embedded status or error field.
    #[error("{platform} API error{}: {message}", code_suffix(.code))]
    Remote {
        /// Platform that rejected the call.
        platform: Platform,
        /// Embedded status code, when the platform supplies one.
        code: Option<i64>,
        /// Platform-supplied message, threaded through verbatim.
        message: String,
    },

    /// The request asks for functionality the adapter deliberately omits.
    #[error("{0}")]
    Unsupported(String),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A fault caught at the dispatch boundary (e.g. a panicked task).
    #[error("internal error: {0}")]
    Internal(String),
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|c| format!(" {c}")).unwrap_or_default()
}

impl PublishError {
    /// Classify this error into the gateway's reporting taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PublishError::MissingCredentials { .. } | PublishError::InvalidArguments(_) => {
                ErrorKind::Validation
            }
            PublishError::Transport(_)
            | PublishError::Timeout { .. }
            | PublishError::InvalidResponse(_)
            | PublishError::Json(_) => ErrorKind::Transport,
            PublishError::Remote { .. } => ErrorKind::RemoteProtocol,
            PublishError::Unsupported(_) => ErrorKind::UnsupportedOperation,
            PublishError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Shorthand for a [`PublishError::Remote`] built from an embedded status.
    pub fn remote(platform: Platform, code: Option<i64>, message: impl Into<String>) -> Self {
        PublishError::Remote {
            platform,
            code,
            message: message.into(),
        }
    }

    /// Append `note` to the error's description, keeping its kind.
    ///
    /// Used when an earlier step already changed remote state, so the
    /// caller learns about it from the failure message.
    pub fn with_note(self, note: impl AsRef<str>) -> Self {
        let note = note.as_ref();
        match self {
            PublishError::Remote {
                platform,
                code,
                message,
            } => PublishError::Remote {
                platform,
                code,
                message: format!("{message}; {note}"),
            },
            PublishError::Timeout { operation } => PublishError::Timeout {
                operation: format!("{operation}; {note}"),
            },
            PublishError::Transport(m) => PublishError::Transport(format!("{m}; {note}")),
            PublishError::InvalidResponse(m) => {
                PublishError::InvalidResponse(format!("{m}; {note}"))
            }
            PublishError::Json(e) => PublishError::InvalidResponse(format!("{e}; {note}")),
            PublishError::InvalidArguments(m) => {
                PublishError::InvalidArguments(format!("{m}; {note}"))
            }
            PublishError::Unsupported(m) => PublishError::Unsupported(format!("{m}; {note}")),
            PublishError::Internal(m) => PublishError::Internal(format!("{m}; {note}")),
            missing @ PublishError::MissingCredentials { .. } => missing,
        }
    }
}

/// Convenience alias for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;
