use std::sync::Arc;

use lanewright_core::{AppError, AppResult, CardId, ListId, RuleId};
use lanewright_domain::{
    ActionOutcome, ActionPayload, Board, DomainEvent, EventEnvelope, EventSummary, OutcomeStatus,
    Rule, RuleExecution,
};
use serde_json::json;

use crate::automation_ports::{
    BoardRepository, ClaimedEvent, EventQueue, RealtimePublisher, RuleRepository, StepJournal,
};
use crate::step_checkpoint::run_step;

mod actions;
mod execution;
mod matching;
mod queue;


pub use matching::match_rules;

/// Realtime event name published after a rule fully succeeds.
pub const AUTOMATION_EXECUTED_EVENT: &str = "automation.executed";

/// Automation engine: matches rules to events and executes their actions.
#[derive(Clone)]
pub struct AutomationService {
    rules: Arc<dyn RuleRepository>,
    boards: Arc<dyn BoardRepository>,
    journal: Arc<dyn StepJournal>,
    publisher: Arc<dyn RealtimePublisher>,
    queue: Option<Arc<dyn EventQueue>>,
}

impl AutomationService {
    /// Creates an automation service.
    #[must_use]
    pub fn new(
        rules: Arc<dyn RuleRepository>,
        boards: Arc<dyn BoardRepository>,
        journal: Arc<dyn StepJournal>,
        publisher: Arc<dyn RealtimePublisher>,
    ) -> Self {
        Self {
            rules,
            boards,
            journal,
            publisher,
            queue: None,
        }
    }

    /// Adds the queue consumed by worker runtimes.
    #[must_use]
    pub fn with_event_queue(mut self, queue: Arc<dyn EventQueue>) -> Self {
        self.queue = Some(queue);
        self
    }
}
