use async_trait::async_trait;
use lanewright_core::AppResult;
use serde_json::Value;

/// Realtime pub/sub port used to refresh connected board viewers.
#[async_trait]
pub trait RealtimePublisher: Send + Sync {
    /// Publishes one event on a channel.
    async fn publish(&self, channel: &str, event: &str, payload: Value) -> AppResult<()>;
}
