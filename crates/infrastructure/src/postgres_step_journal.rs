use async_trait::async_trait;
use lanewright_application::StepJournal;
use lanewright_core::{AppError, AppResult};
use serde_json::Value;
use sqlx::PgPool;

/// PostgreSQL-backed step checkpoint journal.
#[derive(Clone)]
pub struct PostgresStepJournal {
    pool: PgPool,
}

impl PostgresStepJournal {
    /// Creates a step journal with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StepJournal for PostgresStepJournal {
    async fn completed_step(&self, task_key: &str, step_key: &str) -> AppResult<Option<Value>> {
        sqlx::query_scalar::<_, Value>(
            r#"
            SELECT output
            FROM automation_task_steps
            WHERE task_key = $1 AND step_key = $2
            "#,
        )
        .bind(task_key)
        .bind(step_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load checkpoint '{task_key}/{step_key}': {error}"
            ))
        })
    }

    async fn record_step(&self, task_key: &str, step_key: &str, output: Value) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO automation_task_steps (task_key, step_key, output)
            VALUES ($1, $2, $3)
            ON CONFLICT (task_key, step_key) DO NOTHING
            "#,
        )
        .bind(task_key)
        .bind(step_key)
        .bind(output)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to record checkpoint '{task_key}/{step_key}': {error}"
            ))
        })?;

        Ok(())
    }
}
