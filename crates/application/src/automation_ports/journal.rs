use async_trait::async_trait;
use lanewright_core::AppResult;
use serde_json::Value;

/// Checkpoint store for named steps of a retryable task.
#[async_trait]
pub trait StepJournal: Send + Sync {
    /// Returns the recorded output of a completed step.
    async fn completed_step(&self, task_key: &str, step_key: &str) -> AppResult<Option<Value>>;

    /// Records a completed step; recording the same step twice keeps the first output.
    async fn record_step(&self, task_key: &str, step_key: &str, output: Value) -> AppResult<()>;
}
