use std::sync::Arc;

use lanewright_application::{
    BoardRepository, BoardService, EventTransport, RuleRepository, RuleService,
};
use lanewright_core::AppError;
use lanewright_infrastructure::{
    PostgresBoardRepository, PostgresEventQueue, PostgresRuleRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let rule_repository: Arc<dyn RuleRepository> =
        Arc::new(PostgresRuleRepository::new(pool.clone()));
    let board_repository: Arc<dyn BoardRepository> =
        Arc::new(PostgresBoardRepository::new(pool.clone()));
    let event_transport: Arc<dyn EventTransport> = Arc::new(PostgresEventQueue::new(pool));

    Ok(AppState {
        rule_service: RuleService::new(rule_repository, board_repository.clone()),
        board_service: BoardService::new(board_repository, event_transport.clone()),
        event_transport,
        worker_shared_secret: config.worker_shared_secret.clone(),
    })
}
