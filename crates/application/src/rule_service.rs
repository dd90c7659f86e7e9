use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use lanewright_core::{ActorIdentity, AppError, AppResult, BoardId, RuleId};
use lanewright_domain::{
    ActionPayload, AutomationCategory, Rule, RuleDetails, RuleInput, TemplateFields,
    TriggerPayload, readable_sentence, to_backend_action, to_backend_trigger,
    week_number_since_epoch,
};
use serde::Serialize;

use crate::automation_ports::{BoardRepository, RuleRepository};
use crate::board_access::{require_manager, require_member};

mod definitions;

#[cfg(test)]
mod tests;

/// Rule creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRuleInput {
    /// Owning board.
    pub board_id: BoardId,
    /// Trigger payload.
    pub trigger: TriggerPayload,
    /// Ordered action payloads.
    pub actions: Vec<ActionPayload>,
}

/// Rule together with its rendered sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    /// Stored rule.
    pub rule: Rule,
    /// Human-readable description.
    pub sentence: String,
}

/// Application service for board automation rules.
#[derive(Clone)]
pub struct RuleService {
    rules: Arc<dyn RuleRepository>,
    boards: Arc<dyn BoardRepository>,
}

impl RuleService {
    /// Creates a rule service.
    #[must_use]
    pub fn new(rules: Arc<dyn RuleRepository>, boards: Arc<dyn BoardRepository>) -> Self {
        Self { rules, boards }
    }
}
