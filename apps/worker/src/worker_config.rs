use std::env;

use chrono::{FixedOffset, NaiveTime};
use lanewright_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    pub redis_url: String,
    pub realtime_channel_prefix: String,
    pub worker_id: String,
    pub claim_limit: usize,
    pub lease_seconds: u32,
    pub poll_interval_ms: u64,
    pub max_attempts: u32,
    pub schedule_utc_offset: FixedOffset,
    pub schedule_run_at: NaiveTime,
}

impl WorkerConfig {
    pub fn load() -> AppResult<Self> {
        let database_url = required_env("DATABASE_URL")?;
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_owned());
        let realtime_channel_prefix = env::var("REALTIME_CHANNEL_PREFIX").unwrap_or_default();
        let worker_id = env::var("WORKER_ID")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| format!("worker-{}", std::process::id()));
        let claim_limit = parse_env("WORKER_CLAIM_LIMIT", 10_usize)?;
        let lease_seconds = parse_env("WORKER_LEASE_SECONDS", 30_u32)?;
        let poll_interval_ms = parse_env("WORKER_POLL_INTERVAL_MS", 1500_u64)?;
        let max_attempts = parse_env("WORKER_MAX_ATTEMPTS", 5_u32)?;
        let schedule_utc_offset =
            parse_utc_offset_minutes(parse_env("SCHEDULE_UTC_OFFSET_MINUTES", 0_i32)?)?;
        let schedule_run_at = match env::var("SCHEDULE_RUN_AT") {
            Ok(value) => parse_run_at(value.as_str())?,
            Err(_) => parse_run_at("00:05")?,
        };

        if claim_limit == 0 {
            return Err(AppError::Validation(
                "WORKER_CLAIM_LIMIT must be greater than zero".to_owned(),
            ));
        }

        if lease_seconds == 0 {
            return Err(AppError::Validation(
                "WORKER_LEASE_SECONDS must be greater than zero".to_owned(),
            ));
        }

        if poll_interval_ms == 0 {
            return Err(AppError::Validation(
                "WORKER_POLL_INTERVAL_MS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            database_url,
            redis_url,
            realtime_channel_prefix,
            worker_id,
            claim_limit,
            lease_seconds,
            poll_interval_ms,
            max_attempts,
            schedule_utc_offset,
            schedule_run_at,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_utc_offset_minutes(minutes: i32) -> AppResult<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "SCHEDULE_UTC_OFFSET_MINUTES must be within one day, got {minutes}"
            ))
        })
}

fn parse_run_at(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|error| {
        AppError::Validation(format!(
            "SCHEDULE_RUN_AT must be formatted as HH:MM, got '{value}': {error}"
        ))
    })
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn parse_env<T>(name: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value.trim().parse::<T>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, Timelike};

    use super::{parse_run_at, parse_utc_offset_minutes};

    #[test]
    fn run_at_parses_hours_and_minutes() {
        let run_at = parse_run_at(" 06:30 ").unwrap_or_else(|_| unreachable!());
        assert_eq!(run_at, NaiveTime::from_hms_opt(6, 30, 0).unwrap_or_default());
        assert_eq!(run_at.minute(), 30);

        assert!(parse_run_at("6am").is_err());
        assert!(parse_run_at("24:00").is_err());
    }

    #[test]
    fn utc_offset_is_bounded_to_one_day() {
        let offset = parse_utc_offset_minutes(-300).unwrap_or_else(|_| unreachable!());
        assert_eq!(offset.local_minus_utc(), -300 * 60);

        assert!(parse_utc_offset_minutes(24 * 60).is_err());
    }
}
