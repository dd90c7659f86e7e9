use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lanewright_core::{AppResult, BoardId, RuleId};
use lanewright_domain::{AutomationCategory, Rule};

/// Boards owning at least one active scheduled rule, partitioned by trigger.
///
/// A board appears in every partition it has a rule for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduledRuleIndex {
    /// Boards with a `WHEN_SCHEDULED_DAILY` rule.
    pub daily: Vec<BoardId>,
    /// Boards with a `WHEN_SCHEDULED_WEEKLY` rule.
    pub weekly: Vec<BoardId>,
    /// Boards with a `WHEN_SCHEDULED_X_WEEKS` rule.
    pub x_weeks: Vec<BoardId>,
}

impl ScheduledRuleIndex {
    /// Returns whether no board has a scheduled rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.weekly.is_empty() && self.x_weeks.is_empty()
    }
}

/// Repository port for automation rule definitions.
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Persists a new rule.
    async fn create_rule(&self, rule: Rule) -> AppResult<()>;

    /// Returns one rule, including disabled and soft-deleted rules.
    async fn find_rule(&self, rule_id: RuleId) -> AppResult<Option<Rule>>;

    /// Lists enabled, non-deleted rules of one board and category by ascending creation time.
    async fn list_active_rules(
        &self,
        board_id: BoardId,
        category: AutomationCategory,
    ) -> AppResult<Vec<Rule>>;

    /// Updates the enabled flag and returns the updated rule.
    async fn set_rule_enabled(
        &self,
        rule_id: RuleId,
        is_enabled: bool,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Rule>;

    /// Marks a rule deleted.
    async fn soft_delete_rule(&self, rule_id: RuleId, updated_at: DateTime<Utc>) -> AppResult<()>;

    /// Returns boards with active scheduled rules.
    async fn scheduled_rule_index(&self) -> AppResult<ScheduledRuleIndex>;

    /// Returns the current round-robin cursor of a rule and increments it.
    async fn advance_round_robin_cursor(&self, rule_id: RuleId) -> AppResult<u64>;
}
