//! Redis pub/sub realtime publisher.

use async_trait::async_trait;
use lanewright_application::RealtimePublisher;
use lanewright_core::{AppError, AppResult};
use redis::AsyncCommands;
use serde_json::{Value, json};

/// Redis implementation of the realtime publisher port.
#[derive(Clone)]
pub struct RedisRealtimePublisher {
    client: redis::Client,
    channel_prefix: String,
}

impl RedisRealtimePublisher {
    /// Creates a publisher with a configured Redis client and channel prefix.
    #[must_use]
    pub fn new(client: redis::Client, channel_prefix: impl Into<String>) -> Self {
        Self {
            client,
            channel_prefix: channel_prefix.into(),
        }
    }

    fn channel_for(&self, channel: &str) -> String {
        format!("{}{channel}", self.channel_prefix)
    }

    fn encode_message(event: &str, payload: Value) -> AppResult<String> {
        serde_json::to_string(&json!({ "event": event, "payload": payload })).map_err(|error| {
            AppError::Internal(format!("failed to encode realtime message '{event}': {error}"))
        })
    }
}

#[async_trait]
impl RealtimePublisher for RedisRealtimePublisher {
    async fn publish(&self, channel: &str, event: &str, payload: Value) -> AppResult<()> {
        let channel = self.channel_for(channel);
        let message = Self::encode_message(event, payload)?;
        let mut connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))?;

        let receivers: i64 = connection
            .publish(channel.as_str(), message)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to publish '{event}' to channel '{channel}': {error}"
                ))
            })?;

        tracing::debug!(channel = channel.as_str(), event, receivers, "realtime event published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::RedisRealtimePublisher;

    #[test]
    fn channel_prefix_is_prepended() {
        let client =
            redis::Client::open("redis://127.0.0.1:6379").unwrap_or_else(|_| unreachable!());
        let publisher = RedisRealtimePublisher::new(client, "lanewright:");

        assert_eq!(publisher.channel_for("board:roadmap"), "lanewright:board:roadmap");
    }

    #[test]
    fn message_wraps_event_and_payload() {
        let encoded = RedisRealtimePublisher::encode_message(
            "automation.executed",
            json!({"ruleId": "r-1"}),
        )
        .unwrap_or_else(|_| unreachable!());
        let decoded: Value =
            serde_json::from_str(encoded.as_str()).unwrap_or_else(|_| unreachable!());

        assert_eq!(decoded["event"], "automation.executed");
        assert_eq!(decoded["payload"]["ruleId"], "r-1");
    }
}
