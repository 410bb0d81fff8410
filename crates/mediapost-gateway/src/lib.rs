//! # mediapost-gateway
//!
//! The tool surface of the publishing gateway.
//!
//! - **[`tools`]** -- the six `publish_to_<platform>` tool definitions
//! - **[`dispatcher`]** -- [`Dispatcher`], tool name to adapter, one
//!   [`PublishResult`](mediapost_types::PublishResult) per call
//! - **[`server`]** -- [`GatewayServer`], newline-delimited JSON-RPC (MCP)
//!   and line-protocol front end over any async reader/writer pair
//! - **[`protocol`]** -- wire types shared by the server and its tests
//! - **[`error`]** -- [`GatewayError`]
//!
//! An unknown tool name is the only failure reported through the
//! transport's error channel. Everything an adapter does, including
//! failing, comes back as ordinary tool output.

pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use dispatcher::Dispatcher;
pub use error::{GatewayError, Result};
pub use server::GatewayServer;
pub use tools::{ToolDefinition, tool_definitions};
