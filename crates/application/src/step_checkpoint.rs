use std::future::Future;

use lanewright_core::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::automation_ports::StepJournal;

/// Runs one named step of a task unless the journal already holds its output.
///
/// The step future is only polled when no checkpoint exists, so a retried task
/// replays completed side effects from the journal instead of repeating them.
pub(crate) async fn run_step<T, F>(
    journal: &dyn StepJournal,
    task_key: &str,
    step_key: &str,
    step: F,
) -> AppResult<T>
where
    T: Serialize + DeserializeOwned,
    F: Future<Output = AppResult<T>>,
{
    if let Some(recorded) = journal.completed_step(task_key, step_key).await? {
        return serde_json::from_value(recorded).map_err(|error| {
            AppError::Internal(format!(
                "checkpoint '{task_key}/{step_key}' holds unreadable output: {error}"
            ))
        });
    }

    let output = step.await?;
    let recorded = serde_json::to_value(&output).map_err(|error| {
        AppError::Internal(format!(
            "failed to encode checkpoint '{task_key}/{step_key}': {error}"
        ))
    })?;
    journal.record_step(task_key, step_key, recorded).await?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use lanewright_core::{AppError, AppResult};

    use super::run_step;
    use crate::test_support::FakeStepJournal;

    #[tokio::test]
    async fn completed_step_is_not_run_again() {
        let journal = FakeStepJournal::default();

        let first: AppResult<u32> = run_step(&journal, "task", "step", async { Ok(7) }).await;
        let second: AppResult<u32> = run_step(&journal, "task", "step", async {
            Err(AppError::Internal("must not run".to_owned()))
        })
        .await;

        assert_eq!(first.unwrap_or_else(|_| unreachable!()), 7);
        assert_eq!(second.unwrap_or_else(|_| unreachable!()), 7);
    }

    #[tokio::test]
    async fn failed_step_is_not_recorded() {
        let journal = FakeStepJournal::default();

        let failed: AppResult<u32> = run_step(&journal, "task", "step", async {
            Err(AppError::Internal("store offline".to_owned()))
        })
        .await;
        assert!(failed.is_err());

        let retried: AppResult<u32> = run_step(&journal, "task", "step", async { Ok(3) }).await;
        assert_eq!(retried.unwrap_or_else(|_| unreachable!()), 3);
    }
}
