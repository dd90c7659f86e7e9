use async_trait::async_trait;
use lanewright_application::{ClaimedEvent, EventQueue, EventTransport};
use lanewright_core::{AppError, AppResult};
use lanewright_domain::EventEnvelope;
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, Transaction};


/// Default delivery attempts before an event is dead-lettered.
pub const DEFAULT_MAX_ATTEMPTS: i32 = 5;

/// PostgreSQL-backed at-least-once event queue.
///
/// Events are deduplicated by envelope id on enqueue and leased to one worker
/// at a time with `FOR UPDATE SKIP LOCKED`.
#[derive(Clone)]
pub struct PostgresEventQueue {
    pool: PgPool,
    max_attempts: i32,
}

impl PostgresEventQueue {
    /// Creates an event queue with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides delivery attempts before dead-lettering.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> AppResult<Self> {
        if max_attempts == 0 {
            return Err(AppError::Validation(
                "max_attempts must be greater than zero".to_owned(),
            ));
        }

        self.max_attempts = i32::try_from(max_attempts).map_err(|error| {
            AppError::Validation(format!("invalid event queue max_attempts value: {error}"))
        })?;
        Ok(self)
    }

    async fn enqueue(
        &self,
        transaction: &mut Transaction<'_, Postgres>,
        envelope: &EventEnvelope,
    ) -> AppResult<()> {
        let payload = serde_json::to_value(envelope).map_err(|error| {
            AppError::Internal(format!(
                "failed to serialize event '{}': {error}",
                envelope.id
            ))
        })?;

        sqlx::query(
            r#"
            INSERT INTO automation_event_jobs (
                event_id,
                board_id,
                event_type,
                envelope,
                status,
                max_attempts,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, 'pending', $5, now(), now())
            ON CONFLICT (event_id)
            DO NOTHING
            "#,
        )
        .bind(envelope.id.as_str())
        .bind(envelope.event.board_id().as_uuid())
        .bind(envelope.event.event_type())
        .bind(payload)
        .bind(self.max_attempts)
        .execute(&mut **transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to enqueue event '{}': {error}", envelope.id))
        })?;

        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct ClaimedEventRow {
    job_id: uuid::Uuid,
    envelope: Value,
    attempts: i32,
    lease_token: String,
}

#[async_trait]
impl EventTransport for PostgresEventQueue {
    async fn emit(&self, envelope: EventEnvelope) -> AppResult<()> {
        self.emit_batch(vec![envelope]).await
    }

    async fn emit_batch(&self, envelopes: Vec<EventEnvelope>) -> AppResult<()> {
        if envelopes.is_empty() {
            return Ok(());
        }

        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start event enqueue transaction: {error}"))
        })?;

        for envelope in &envelopes {
            self.enqueue(&mut transaction, envelope).await?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit event enqueue transaction: {error}"))
        })?;

        tracing::debug!(events = envelopes.len(), "automation events enqueued");
        Ok(())
    }
}

#[async_trait]
impl EventQueue for PostgresEventQueue {
    async fn claim_events(
        &self,
        worker_id: &str,
        limit: usize,
        lease_seconds: u32,
    ) -> AppResult<Vec<ClaimedEvent>> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start event claim transaction: {error}"))
        })?;

        sqlx::query(
            r#"
            UPDATE automation_event_jobs
            SET
                status = 'dead_letter',
                leased_by = NULL,
                lease_token = NULL,
                lease_expires_at = NULL,
                last_error = COALESCE(last_error, 'lease expired on final attempt'),
                updated_at = now()
            WHERE status = 'leased'
              AND lease_expires_at < now()
              AND attempts >= max_attempts
            "#,
        )
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to dead-letter expired event leases: {error}"))
        })?;

        let rows = sqlx::query_as::<_, ClaimedEventRow>(
            r#"
            WITH candidate_jobs AS (
                SELECT id
                FROM automation_event_jobs
                WHERE status = 'pending'
                   OR (status = 'leased' AND lease_expires_at < now())
                ORDER BY created_at ASC
                LIMIT $1
                FOR UPDATE SKIP LOCKED
            )
            UPDATE automation_event_jobs jobs
            SET
                status = 'leased',
                attempts = jobs.attempts + 1,
                leased_by = $2,
                lease_token = gen_random_uuid()::TEXT,
                lease_expires_at = now() + make_interval(secs => $3::INT),
                updated_at = now()
            FROM candidate_jobs
            WHERE jobs.id = candidate_jobs.id
            RETURNING jobs.id AS job_id, jobs.envelope, jobs.attempts, jobs.lease_token
            "#,
        )
        .bind(i64::try_from(limit).map_err(|error| {
            AppError::Validation(format!("invalid event claim limit: {error}"))
        })?)
        .bind(worker_id)
        .bind(i32::try_from(lease_seconds).map_err(|error| {
            AppError::Validation(format!("invalid event lease_seconds: {error}"))
        })?)
        .fetch_all(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to claim events for worker '{worker_id}': {error}"
            ))
        })?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit event claim transaction: {error}"))
        })?;

        let mut claimed: Vec<ClaimedEvent> = rows
            .into_iter()
            .map(claimed_event_from_row)
            .collect::<AppResult<_>>()?;
        claimed.sort_by_key(|event| event.envelope.occurred_at);

        Ok(claimed)
    }

    async fn complete_event(
        &self,
        job_id: &str,
        worker_id: &str,
        lease_token: &str,
    ) -> AppResult<()> {
        let job_uuid = parse_job_id(job_id)?;

        let result = sqlx::query(
            r#"
            UPDATE automation_event_jobs
            SET
                status = 'completed',
                leased_by = NULL,
                lease_token = NULL,
                lease_expires_at = NULL,
                last_error = NULL,
                updated_at = now()
            WHERE id = $1
              AND leased_by = $2
              AND lease_token = $3
              AND status = 'leased'
            "#,
        )
        .bind(job_uuid)
        .bind(worker_id)
        .bind(lease_token)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to complete event job '{job_id}' for worker '{worker_id}': {error}"
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(lease_conflict(job_id, worker_id));
        }

        Ok(())
    }

    async fn fail_event(
        &self,
        job_id: &str,
        worker_id: &str,
        lease_token: &str,
        error_message: &str,
    ) -> AppResult<()> {
        let job_uuid = parse_job_id(job_id)?;

        let status = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE automation_event_jobs
            SET
                status = CASE WHEN attempts >= max_attempts THEN 'dead_letter' ELSE 'pending' END,
                leased_by = NULL,
                lease_token = NULL,
                lease_expires_at = NULL,
                last_error = $4,
                updated_at = now()
            WHERE id = $1
              AND leased_by = $2
              AND lease_token = $3
              AND status = 'leased'
            RETURNING status
            "#,
        )
        .bind(job_uuid)
        .bind(worker_id)
        .bind(lease_token)
        .bind(error_message)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to mark event job '{job_id}' as failed for worker '{worker_id}': {error}"
            ))
        })?
        .ok_or_else(|| lease_conflict(job_id, worker_id))?;

        if status == "dead_letter" {
            tracing::error!(
                job_id,
                worker_id,
                error = error_message,
                "automation event dead-lettered"
            );
        }

        Ok(())
    }
}

fn claimed_event_from_row(row: ClaimedEventRow) -> AppResult<ClaimedEvent> {
    let envelope: EventEnvelope = serde_json::from_value(row.envelope).map_err(|error| {
        AppError::Internal(format!(
            "queued event job '{}' has an invalid envelope: {error}",
            row.job_id
        ))
    })?;

    Ok(ClaimedEvent {
        job_id: row.job_id.to_string(),
        envelope,
        attempt: row.attempts,
        lease_token: row.lease_token,
    })
}

fn parse_job_id(job_id: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(job_id)
        .map_err(|error| AppError::Validation(format!("invalid event job id '{job_id}': {error}")))
}

fn lease_conflict(job_id: &str, worker_id: &str) -> AppError {
    AppError::Conflict(format!(
        "event job '{job_id}' is not leased by worker '{worker_id}' under this lease token"
    ))
}
