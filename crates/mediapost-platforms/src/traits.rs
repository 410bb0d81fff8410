//! The [`Publisher`] trait every platform adapter implements.

use async_trait::async_trait;
use mediapost_types::{Platform, PublishRequest, PublishResult, Result};
use tracing::{info, warn};

/// A platform adapter.
///
/// Implementations write their protocol as a linear pipeline in
/// [`try_publish`](Publisher::try_publish): each remote step either yields
/// a value for the next step or returns early through `?`, so a later step
/// can never run after an earlier one failed.
///
/// [`publish`](Publisher::publish) is the boundary: it never fails, and
/// renders any error into a `success: false` [`PublishResult`].
#[async_trait]
pub trait Publisher: Send + Sync {
    /// The platform this adapter publishes to.
    fn platform(&self) -> Platform;

    /// Run the platform protocol.
    ///
    /// # Errors
    ///
    /// Any [`PublishError`](mediapost_types::PublishError): missing
    /// credentials and bad arguments before the first remote call,
    /// transport and remote-protocol errors after it.
    async fn try_publish(&self, request: &PublishRequest) -> Result<PublishResult>;

    /// Run the platform protocol and normalize the outcome.
    async fn publish(&self, request: &PublishRequest) -> PublishResult {
        let platform = self.platform();
        match self.try_publish(request).await {
            Ok(result) => {
                info!(%platform, message = %result.message, "publish succeeded");
                result
            }
            Err(err) => {
                warn!(%platform, kind = ?err.kind(), error = %err, "publish failed");
                PublishResult::failure(&err)
            }
        }
    }
}
