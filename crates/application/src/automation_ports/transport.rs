use async_trait::async_trait;
use lanewright_core::AppResult;
use lanewright_domain::EventEnvelope;

/// Producer side of the at-least-once event transport.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Emits one event.
    async fn emit(&self, envelope: EventEnvelope) -> AppResult<()>;

    /// Emits several events in one call.
    async fn emit_batch(&self, envelopes: Vec<EventEnvelope>) -> AppResult<()>;
}

/// Event leased to one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedEvent {
    /// Queue job id.
    pub job_id: String,
    /// Delivered event.
    pub envelope: EventEnvelope,
    /// Delivery attempt, starting at 1.
    pub attempt: i32,
    /// Lease fencing token.
    pub lease_token: String,
}

/// Consumer side of the event transport.
#[async_trait]
pub trait EventQueue: Send + Sync {
    /// Claims pending events for one worker with a bounded lease.
    async fn claim_events(
        &self,
        worker_id: &str,
        limit: usize,
        lease_seconds: u32,
    ) -> AppResult<Vec<ClaimedEvent>>;

    /// Marks one leased event processed.
    async fn complete_event(&self, job_id: &str, worker_id: &str, lease_token: &str)
    -> AppResult<()>;

    /// Marks one leased event failed so it is retried or dead-lettered.
    async fn fail_event(
        &self,
        job_id: &str,
        worker_id: &str,
        lease_token: &str,
        error_message: &str,
    ) -> AppResult<()>;
}
