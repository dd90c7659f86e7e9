use std::sync::Arc;

use lanewright_application::{BoardService, EventTransport, RuleService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub rule_service: RuleService,
    pub board_service: BoardService,
    pub event_transport: Arc<dyn EventTransport>,
    pub worker_shared_secret: String,
}
