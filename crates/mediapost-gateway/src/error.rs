//! Gateway error types.

use thiserror::Error;

/// Errors produced by the dispatcher and the stdio server.
///
/// Adapter failures are not errors at this level: they are rendered into a
/// `success: false` [`PublishResult`](mediapost_types::PublishResult). Only
/// conditions with no platform context end up here.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The tool name does not map to any adapter.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The gateway could not be set up (e.g. the HTTP client failed to build).
    #[error("gateway setup failed: {0}")]
    Setup(String),

    /// Underlying I/O error on the transport.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, GatewayError>;
