//! # mediapost-types
//!
//! Core type definitions for the mediapost publishing gateway.
//!
//! Every other mediapost crate depends on this one. It contains:
//!
//! - **[`platform`]** -- the closed set of supported [`Platform`]s
//! - **[`secret`]** -- [`SecretString`], a redacting wrapper for credential values
//! - **[`request`]** -- [`PublishRequest`] and the per-request [`Credentials`] bag
//! - **[`result`]** -- [`PublishResult`], the normalized reply of every adapter
//! - **[`error`]** -- [`PublishError`] and its four-way [`ErrorKind`] taxonomy
//! - **[`config`]** -- [`GatewayConfig`] (timeouts and endpoint overrides, never secrets)

pub mod config;
pub mod error;
pub mod platform;
pub mod request;
pub mod result;
pub mod secret;

pub use config::{EndpointConfig, GatewayConfig};
pub use error::{ErrorKind, PublishError, Result};
pub use platform::Platform;
pub use request::{Credentials, PublishRequest};
pub use result::{ArtifactIds, PublishResult};
pub use secret::SecretString;
