//! Wire types for the stdio server.
//!
//! JSON-RPC 2.0 envelopes for the MCP subset, the MCP tool-call result,
//! and the plain line protocol used by script-based harnesses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
pub const NOT_INITIALIZED: i32 = -32002;

/// JSON-RPC 2.0 request or notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, normally `"2.0"`.
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Request identifier; absent for notifications. An explicit `null`
    /// is kept as `Some(Value::Null)` and still gets a reply.
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default = "default_params")]
    pub params: Value,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn default_params() -> Value {
    Value::Object(serde_json::Map::new())
}

impl JsonRpcRequest {
    /// Notifications carry no id and never get a reply.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version, always `"2.0"`.
    pub jsonrpc: String,
    /// Identifier of the request this answers (`null` if unknown).
    pub id: Value,
    /// Successful result (mutually exclusive with `error`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error result (mutually exclusive with `result`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i32,
    /// Error message.
    pub message: String,
    /// Optional structured error data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A single content block of a tool result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Plain text content.
    #[serde(rename = "text")]
    Text { text: String },
}

/// The MCP result of a `tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallToolResult {
    /// Content blocks produced by the tool.
    pub content: Vec<ContentBlock>,
    /// Whether the call itself failed. Publish failures are ordinary
    /// results and keep this `false`.
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

impl CallToolResult {
    /// A successful text result.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }
}

/// A request in the plain line protocol.
///
/// `{"action": "list_tools"}` or `{"tool": "<name>", "args": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum LineRequest {
    ListTools,
    Call { tool: String, args: Value },
}

impl LineRequest {
    /// Interpret a parsed line. `Err` carries the message for the
    /// `{"error": ...}` reply.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        if let Some(action) = value.get("action") {
            return match action.as_str() {
                Some("list_tools") => Ok(LineRequest::ListTools),
                Some(other) => Err(format!("Unknown action: {other}")),
                None => Err("action must be a string".into()),
            };
        }
        match value.get("tool") {
            Some(Value::String(tool)) => {
                let args = value
                    .get("args")
                    .or_else(|| value.get("arguments"))
                    .cloned()
                    .unwrap_or_else(default_params);
                Ok(LineRequest::Call {
                    tool: tool.clone(),
                    args,
                })
            }
            Some(_) => Err("tool must be a string".into()),
            None => Err("expected a JSON-RPC request, an action, or a tool call".into()),
        }
    }
}
