//! Lanewright automation worker runtime.

#![forbid(unsafe_code)]

mod daily_schedule;
mod worker_config;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use lanewright_application::{
    AutomationService, BoardRepository, EventTransport, RuleRepository, ScheduleService,
    StepJournal,
};
use lanewright_core::{AppError, AppResult};
use lanewright_domain::OutcomeStatus;
use lanewright_infrastructure::{
    PostgresBoardRepository, PostgresEventQueue, PostgresRuleRepository, PostgresStepJournal,
    RedisRealtimePublisher,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::daily_schedule::DailySchedule;
use crate::worker_config::{WorkerConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = WorkerConfig::load()?;
    let pool = connect_pool(config.database_url.as_str()).await?;
    let (automation_service, schedule_service) = build_services(pool, &config)?;

    info!(
        worker_id = %config.worker_id,
        claim_limit = config.claim_limit,
        lease_seconds = config.lease_seconds,
        poll_interval_ms = config.poll_interval_ms,
        max_attempts = config.max_attempts,
        schedule_run_at = %config.schedule_run_at,
        schedule_utc_offset = %config.schedule_utc_offset,
        "lanewright-worker started"
    );

    let schedule = DailySchedule::new(config.schedule_utc_offset, config.schedule_run_at);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    tokio::spawn(run_scheduler(schedule_service, schedule, poll_interval));

    run_event_loop(&automation_service, &config).await;
    Ok(())
}

async fn connect_pool(database_url: &str) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

fn build_services(
    pool: PgPool,
    config: &WorkerConfig,
) -> AppResult<(AutomationService, ScheduleService)> {
    let redis_client = redis::Client::open(config.redis_url.as_str())
        .map_err(|error| AppError::Validation(format!("invalid REDIS_URL: {error}")))?;

    let rule_repository: Arc<dyn RuleRepository> =
        Arc::new(PostgresRuleRepository::new(pool.clone()));
    let board_repository: Arc<dyn BoardRepository> =
        Arc::new(PostgresBoardRepository::new(pool.clone()));
    let journal: Arc<dyn StepJournal> = Arc::new(PostgresStepJournal::new(pool.clone()));
    let queue = Arc::new(PostgresEventQueue::new(pool).with_max_attempts(config.max_attempts)?);
    let transport: Arc<dyn EventTransport> = queue.clone();
    let publisher = Arc::new(RedisRealtimePublisher::new(
        redis_client,
        config.realtime_channel_prefix.as_str(),
    ));

    let automation_service = AutomationService::new(
        rule_repository.clone(),
        board_repository,
        journal.clone(),
        publisher,
    )
    .with_event_queue(queue);
    let schedule_service = ScheduleService::new(
        rule_repository,
        transport,
        journal,
        config.schedule_utc_offset,
    );

    Ok((automation_service, schedule_service))
}

async fn run_event_loop(automation_service: &AutomationService, config: &WorkerConfig) {
    let poll_interval = Duration::from_millis(config.poll_interval_ms);

    loop {
        let claimed_events = match automation_service
            .claim_events_for_worker(
                config.worker_id.as_str(),
                config.claim_limit,
                config.lease_seconds,
            )
            .await
        {
            Ok(claimed_events) => claimed_events,
            Err(error) => {
                warn!(
                    worker_id = %config.worker_id,
                    error = %error,
                    "failed to claim automation events"
                );
                tokio::time::sleep(poll_interval).await;
                continue;
            }
        };

        if claimed_events.is_empty() {
            tokio::time::sleep(poll_interval).await;
            continue;
        }

        info!(
            worker_id = %config.worker_id,
            claimed_count = claimed_events.len(),
            "claimed automation events"
        );

        for claimed in claimed_events {
            let job_id = claimed.job_id.clone();
            let event_id = claimed.envelope.id.clone();
            let attempt = claimed.attempt;

            match automation_service
                .execute_claimed_event(config.worker_id.as_str(), claimed)
                .await
            {
                Ok(summary) => info!(
                    worker_id = %config.worker_id,
                    job_id = %job_id,
                    event_id = %event_id,
                    attempt,
                    rules = summary.rules.len(),
                    succeeded = summary.count(OutcomeStatus::Success),
                    skipped = summary.count(OutcomeStatus::Skipped),
                    failed = summary.count(OutcomeStatus::Failed),
                    "automation event executed"
                ),
                Err(error) => warn!(
                    worker_id = %config.worker_id,
                    job_id = %job_id,
                    event_id = %event_id,
                    attempt,
                    error = %error,
                    "automation event execution failed"
                ),
            }
        }
    }
}

async fn run_scheduler(
    schedule_service: ScheduleService,
    schedule: DailySchedule,
    retry_interval: Duration,
) {
    let mut next_tick = schedule.tick_on_local_date_of(Utc::now());

    loop {
        let tick = match next_tick {
            Ok(tick) => tick,
            Err(error) => {
                warn!(error = %error, "failed to compute next schedule tick");
                tokio::time::sleep(retry_interval).await;
                next_tick = schedule.next_tick_after(Utc::now());
                continue;
            }
        };

        let wait = (tick - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        tokio::time::sleep(wait).await;

        match schedule_service.run_daily_fan_out(Utc::now()).await {
            Ok(summary) => {
                info!(
                    date = %summary.date,
                    events_dispatched = summary.events_dispatched,
                    skipped = summary.skipped,
                    "schedule tick completed"
                );
                next_tick = schedule.next_tick_after(Utc::now());
            }
            Err(error) => {
                warn!(error = %error, "schedule fan-out failed; retrying");
                tokio::time::sleep(retry_interval).await;
            }
        }
    }
}
