use lanewright_core::RuleId;
use serde::{Deserialize, Serialize};

use crate::automation::ActionHandlerKey;

/// Result status of one action execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The action reached its target state.
    Success,
    /// The action could not apply to current board state.
    Skipped,
    /// The store rejected the action.
    Failed,
}

impl OutcomeStatus {
    /// Returns stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

/// Observable record of one action execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    /// Action handler key.
    pub action: ActionHandlerKey,
    /// Result status.
    pub status: OutcomeStatus,
    /// Explanation for skipped and failed outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Affected entity, for example a card or list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ActionOutcome {
    /// Creates a success outcome.
    #[must_use]
    pub fn success(action: ActionHandlerKey, target: impl Into<String>) -> Self {
        Self {
            action,
            status: OutcomeStatus::Success,
            details: None,
            target: Some(target.into()),
        }
    }

    /// Creates a skipped outcome.
    #[must_use]
    pub fn skipped(action: ActionHandlerKey, details: impl Into<String>) -> Self {
        Self {
            action,
            status: OutcomeStatus::Skipped,
            details: Some(details.into()),
            target: None,
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failed(action: ActionHandlerKey, details: impl Into<String>) -> Self {
        Self {
            action,
            status: OutcomeStatus::Failed,
            details: Some(details.into()),
            target: None,
        }
    }

    /// Attaches explanatory details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Returns whether the action succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Outcomes of one matched rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleExecution {
    /// Matched rule.
    pub rule_id: RuleId,
    /// One outcome per action, in action order.
    pub outcomes: Vec<ActionOutcome>,
    /// Whether the realtime notification was published.
    pub notified: bool,
}

impl RuleExecution {
    /// Returns whether every action succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(ActionOutcome::is_success)
    }
}

/// Aggregated outcomes for one event delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Envelope id.
    pub event_id: String,
    /// Present when processing aborted before any rule ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Matched rules in execution order.
    pub rules: Vec<RuleExecution>,
}

impl EventSummary {
    /// Creates a summary for an event whose context could not be loaded.
    #[must_use]
    pub fn aborted(event_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            message: Some(message.into()),
            rules: Vec::new(),
        }
    }

    /// Returns all outcomes across rules.
    pub fn outcomes(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.rules.iter().flat_map(|rule| rule.outcomes.iter())
    }

    /// Returns the number of outcomes with the given status.
    #[must_use]
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes()
            .filter(|outcome| outcome.status == status)
            .count()
    }
}
