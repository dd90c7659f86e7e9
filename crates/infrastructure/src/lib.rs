//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod postgres_board_repository;
mod postgres_event_queue;
mod postgres_rule_repository;
mod postgres_step_journal;
mod redis_realtime_publisher;

pub use postgres_board_repository::PostgresBoardRepository;
pub use postgres_event_queue::{DEFAULT_MAX_ATTEMPTS, PostgresEventQueue};
pub use postgres_rule_repository::PostgresRuleRepository;
pub use postgres_step_journal::PostgresStepJournal;
pub use redis_realtime_publisher::RedisRealtimePublisher;

/// Embedded SQL migrations for the automation store.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
