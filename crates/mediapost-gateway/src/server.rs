//! Stdio server speaking newline-delimited JSON.
//!
//! [`GatewayServer`] is generic over `AsyncBufRead + AsyncWrite` so it can
//! be driven by stdio or by in-memory buffers in tests. Each line is either
//! a JSON-RPC 2.0 message (the MCP subset) or a line-protocol request
//! (`{"action": ...}` / `{"tool": ..., "args": ...}`).
//!
//! Tool calls run as independent tasks. Every reply goes through one
//! channel to a single writer, so lines never interleave; JSON-RPC replies
//! may arrive out of request order and are correlated by `id`.

use std::sync::Arc;

use mediapost_types::{GatewayConfig, PublishResult};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dispatcher::{Dispatcher, invoke};
use crate::error::Result;
use crate::protocol::{
    CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest,
    JsonRpcResponse, LineRequest, METHOD_NOT_FOUND, NOT_INITIALIZED, PARSE_ERROR,
};

// ── Constants ───────────────────────────────────────────────────────────

const PROTOCOL_VERSION: &str = "2025-06-18";
const SERVER_NAME: &str = "mediapost";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One outgoing line.
#[derive(Debug)]
enum Reply {
    Rpc(JsonRpcResponse),
    Line(Value),
}

type ReplyTx = mpsc::UnboundedSender<Reply>;

// ── GatewayServer ──────────────────────────────────────────────────────

/// The publishing gateway's stdio front end.
pub struct GatewayServer {
    dispatcher: Arc<Dispatcher>,
}

impl GatewayServer {
    /// Wrap an existing dispatcher.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Build the dispatcher from `config` and wrap it.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Ok(Self::new(Dispatcher::new(config)?))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Serve until `reader` reaches EOF and every in-flight call has
    /// replied.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tx = Some(tx);
        let mut initialized = false;

        info!("gateway server started");
        loop {
            tokio::select! {
                line = lines.next_line(), if tx.is_some() => {
                    match line? {
                        Some(line) => {
                            if let Some(sender) = &tx {
                                self.handle_line(line.trim(), &mut initialized, sender);
                            }
                        }
                        // Dropping the last sender outside tasks lets the
                        // loop end once in-flight calls have replied.
                        None => tx = None,
                    }
                }
                Some(reply) = rx.recv() => write_reply(&mut writer, &reply).await?,
                else => break,
            }
        }
        info!("gateway server stopped");
        Ok(())
    }

    fn handle_line(&self, line: &str, initialized: &mut bool, tx: &ReplyTx) {
        if line.is_empty() {
            return;
        }

        let msg: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable input line");
                send(tx, Reply::Rpc(JsonRpcResponse::error(Value::Null, PARSE_ERROR, "Parse error")));
                return;
            }
        };

        if msg.get("jsonrpc").is_some() || msg.get("method").is_some() {
            let id = msg.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value::<JsonRpcRequest>(msg) {
                Ok(request) => self.handle_rpc(request, initialized, tx),
                Err(e) => send(
                    tx,
                    Reply::Rpc(JsonRpcResponse::error(
                        id,
                        INVALID_REQUEST,
                        format!("Invalid request: {e}"),
                    )),
                ),
            }
        } else {
            self.handle_line_request(&msg, tx);
        }
    }

    fn handle_rpc(&self, request: JsonRpcRequest, initialized: &mut bool, tx: &ReplyTx) {
        let JsonRpcRequest { id, method, params, .. } = request;
        debug!(%method, "json-rpc request");

        let reply = match method.as_str() {
            "initialize" => {
                *initialized = true;
                Ok(json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {
                        "tools": { "listChanged": false }
                    },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": SERVER_VERSION
                    }
                }))
            }
            "notifications/initialized" => return,
            _ if !*initialized => Err((NOT_INITIALIZED, "Server not initialized".to_owned())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.dispatcher.tools() })),
            "tools/call" => {
                let Some(name) = params.get("name").and_then(Value::as_str) else {
                    respond(tx, id, Err((INVALID_PARAMS, "Missing tool name".to_owned())));
                    return;
                };
                let adapter = match self.dispatcher.adapter(name) {
                    Ok(adapter) => adapter,
                    Err(e) => {
                        respond(tx, id, Err((INVALID_PARAMS, e.to_string())));
                        return;
                    }
                };
                let args = params
                    .get("arguments")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Default::default()));

                debug!(tool = name, "tools/call");
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = invoke(adapter, args).await;
                    respond(&tx, id, call_tool_value(&result));
                });
                return;
            }
            _ => Err((METHOD_NOT_FOUND, format!("Method not found: {method}"))),
        };

        respond(tx, id, reply);
    }

    fn handle_line_request(&self, msg: &Value, tx: &ReplyTx) {
        let request = match LineRequest::from_value(msg) {
            Ok(request) => request,
            Err(message) => {
                send(tx, Reply::Line(json!({ "error": message })));
                return;
            }
        };

        match request {
            LineRequest::ListTools => {
                send(tx, Reply::Line(json!(self.dispatcher.tools())));
            }
            LineRequest::Call { tool, args } => match self.dispatcher.adapter(&tool) {
                Ok(adapter) => {
                    debug!(%tool, "line-protocol call");
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = invoke(adapter, args).await;
                        send(&tx, Reply::Line(json!({ "result": result })));
                    });
                }
                Err(e) => send(tx, Reply::Line(json!({ "error": e.to_string() }))),
            },
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Reply to a JSON-RPC request. Notifications (no id) get nothing.
fn respond(tx: &ReplyTx, id: Option<Value>, outcome: std::result::Result<Value, (i32, String)>) {
    let Some(id) = id else {
        return;
    };
    let response = match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err((code, message)) => JsonRpcResponse::error(id, code, message),
    };
    send(tx, Reply::Rpc(response));
}

fn send(tx: &ReplyTx, reply: Reply) {
    if tx.send(reply).is_err() {
        warn!("reply dropped: server loop has exited");
    }
}

/// Wrap a publish outcome as an MCP tool result. Publish failures are
/// ordinary output, so `isError` stays false.
fn call_tool_value(result: &PublishResult) -> std::result::Result<Value, (i32, String)> {
    serde_json::to_string(result)
        .map(CallToolResult::text)
        .and_then(serde_json::to_value)
        .map_err(|e| (INTERNAL_ERROR, e.to_string()))
}

async fn write_reply<W: AsyncWrite + Unpin>(writer: &mut W, reply: &Reply) -> Result<()> {
    let mut line = match reply {
        Reply::Rpc(response) => serde_json::to_string(response)?,
        Reply::Line(value) => serde_json::to_string(value)?,
    };
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────
