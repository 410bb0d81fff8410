//! Tool-name dispatch.
//!
//! [`Dispatcher`] maps each registered tool name to its [`Adapter`] and
//! turns one tool call into exactly one [`PublishResult`]. Each call runs
//! as its own task, so even a panicking adapter yields a structured
//! failure instead of tearing down the server.

use std::collections::HashMap;
use std::sync::Arc;

use mediapost_platforms::{Adapter, Publisher};
use mediapost_types::{GatewayConfig, Platform, PublishError, PublishRequest, PublishResult};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{GatewayError, Result};
use crate::tools::{self, ToolDefinition};

/// Routes tool calls to platform adapters.
///
/// Adapters are immutable after construction and shared behind [`Arc`],
/// so any number of calls may be in flight at once.
pub struct Dispatcher {
    adapters: HashMap<Platform, Arc<Adapter>>,
}

impl Dispatcher {
    /// Build one adapter per platform from `config`.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let adapters = Adapter::all(config)
            .map_err(|e| GatewayError::Setup(e.to_string()))?
            .into_iter()
            .map(|adapter| (adapter.platform(), Arc::new(adapter)))
            .collect();
        Ok(Self { adapters })
    }

    /// The advertised tool definitions.
    pub fn tools(&self) -> Vec<ToolDefinition> {
        tools::tool_definitions()
    }

    /// Look up the adapter behind `tool`.
    pub fn adapter(&self, tool: &str) -> Result<Arc<Adapter>> {
        tools::find(tool)
            .and_then(|platform| self.adapters.get(&platform))
            .cloned()
            .ok_or_else(|| GatewayError::UnknownTool(tool.to_owned()))
    }

    /// Dispatch one call.
    ///
    /// The only error is [`GatewayError::UnknownTool`]; every adapter-level
    /// outcome, including a fault, comes back as a `PublishResult`.
    pub async fn dispatch(&self, tool: &str, args: Value) -> Result<PublishResult> {
        let adapter = self.adapter(tool)?;
        debug!(tool, "dispatching tool call");
        Ok(invoke(adapter, args).await)
    }
}

/// Parse `args` for the publisher's platform and run it on its own task.
pub async fn invoke<P>(publisher: Arc<P>, args: Value) -> PublishResult
where
    P: Publisher + 'static,
{
    let platform = publisher.platform();
    let request = match PublishRequest::from_arguments(platform, args) {
        Ok(request) => request,
        Err(err) => return PublishResult::failure(&err),
    };

    let task = tokio::spawn(async move { publisher.publish(&request).await });
    match task.await {
        Ok(result) => result,
        Err(join_err) => {
            error!(%platform, error = %join_err, "adapter task failed");
            PublishResult::failure(&PublishError::Internal(format!(
                "{platform} adapter task failed: {join_err}"
            )))
        }
    }
}
