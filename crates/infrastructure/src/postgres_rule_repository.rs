use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lanewright_application::{RuleRepository, ScheduledRuleIndex};
use lanewright_core::{AppError, AppResult, BoardId, RuleId, UserId};
use lanewright_domain::{AutomationCategory, Rule, RuleDetails, RuleInput, TriggerHandlerKey};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

#[cfg(test)]
mod tests;

/// PostgreSQL-backed automation rule repository.
#[derive(Clone)]
pub struct PostgresRuleRepository {
    pool: PgPool,
}

impl PostgresRuleRepository {
    /// Creates a rule repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RuleRow {
    id: uuid::Uuid,
    board_id: uuid::Uuid,
    creator_id: String,
    details: Value,
    is_enabled: bool,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ScheduledBoardRow {
    board_id: uuid::Uuid,
    handler_key: String,
}

const RULE_COLUMNS: &str = r#"
    id,
    board_id,
    creator_id,
    details,
    is_enabled,
    is_deleted,
    created_at,
    updated_at
"#;

#[async_trait]
impl RuleRepository for PostgresRuleRepository {
    async fn create_rule(&self, rule: Rule) -> AppResult<()> {
        let details = serde_json::to_value(rule.details()).map_err(|error| {
            AppError::Internal(format!(
                "failed to serialize automation rule '{}' details: {error}",
                rule.id()
            ))
        })?;

        sqlx::query(
            r#"
            INSERT INTO automation_rules (
                id,
                board_id,
                creator_id,
                category,
                handler_key,
                details,
                is_enabled,
                is_deleted,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(rule.id().as_uuid())
        .bind(rule.board_id().as_uuid())
        .bind(rule.creator_id().as_str())
        .bind(rule.category().as_str())
        .bind(rule.handler_key().as_str())
        .bind(details)
        .bind(rule.is_enabled())
        .bind(rule.is_deleted())
        .bind(rule.created_at())
        .bind(rule.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save automation rule '{}' for board '{}': {error}",
                rule.id(),
                rule.board_id()
            ))
        })?;

        Ok(())
    }

    async fn find_rule(&self, rule_id: RuleId) -> AppResult<Option<Rule>> {
        let row = sqlx::query_as::<_, RuleRow>(&format!(
            "SELECT {RULE_COLUMNS} FROM automation_rules WHERE id = $1"
        ))
        .bind(rule_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load automation rule '{rule_id}': {error}"))
        })?;

        row.map(rule_from_row).transpose()
    }

    async fn list_active_rules(
        &self,
        board_id: BoardId,
        category: AutomationCategory,
    ) -> AppResult<Vec<Rule>> {
        let rows = sqlx::query_as::<_, RuleRow>(&format!(
            r#"
            SELECT {RULE_COLUMNS}
            FROM automation_rules
            WHERE board_id = $1
              AND category = $2
              AND is_enabled
              AND NOT is_deleted
            ORDER BY created_at ASC, id ASC
            "#
        ))
        .bind(board_id.as_uuid())
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list {} rules for board '{board_id}': {error}",
                category.as_str()
            ))
        })?;

        let mut rules = Vec::with_capacity(rows.len());
        for row in rows {
            let rule_id = row.id;
            match rule_from_row(row) {
                Ok(rule) => rules.push(rule),
                Err(error) => tracing::warn!(
                    board_id = %board_id,
                    rule_id = %rule_id,
                    error = %error,
                    "skipping automation rule with undecodable details"
                ),
            }
        }

        Ok(rules)
    }

    async fn set_rule_enabled(
        &self,
        rule_id: RuleId,
        is_enabled: bool,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Rule> {
        let row = sqlx::query_as::<_, RuleRow>(&format!(
            r#"
            UPDATE automation_rules
            SET is_enabled = $2, updated_at = $3
            WHERE id = $1 AND NOT is_deleted
            RETURNING {RULE_COLUMNS}
            "#
        ))
        .bind(rule_id.as_uuid())
        .bind(is_enabled)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update automation rule '{rule_id}': {error}"
            ))
        })?
        .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' not found")))?;

        rule_from_row(row)
    }

    async fn soft_delete_rule(&self, rule_id: RuleId, updated_at: DateTime<Utc>) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE automation_rules
            SET is_deleted = true, updated_at = $2
            WHERE id = $1 AND NOT is_deleted
            "#,
        )
        .bind(rule_id.as_uuid())
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete automation rule '{rule_id}': {error}"
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("rule '{rule_id}' not found")));
        }

        Ok(())
    }

    async fn scheduled_rule_index(&self) -> AppResult<ScheduledRuleIndex> {
        let rows = sqlx::query_as::<_, ScheduledBoardRow>(
            r#"
            SELECT DISTINCT board_id, handler_key
            FROM automation_rules
            WHERE category = 'scheduled'
              AND is_enabled
              AND NOT is_deleted
            ORDER BY board_id, handler_key
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load scheduled rule index: {error}"))
        })?;

        let mut index = ScheduledRuleIndex::default();
        for row in rows {
            let board_id = BoardId::from_uuid(row.board_id);
            match stored_trigger_key(board_id, row.handler_key.as_str())? {
                TriggerHandlerKey::WhenScheduledDaily => index.daily.push(board_id),
                TriggerHandlerKey::WhenScheduledWeekly => index.weekly.push(board_id),
                TriggerHandlerKey::WhenScheduledXWeeks => index.x_weeks.push(board_id),
                other => {
                    tracing::warn!(
                        board_id = %board_id,
                        handler_key = other.as_str(),
                        "ignoring non-scheduled trigger stored in scheduled category"
                    );
                }
            }
        }

        Ok(index)
    }

    async fn advance_round_robin_cursor(&self, rule_id: RuleId) -> AppResult<u64> {
        let current = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO automation_rule_cursors (rule_id, next_index)
            VALUES ($1, 1)
            ON CONFLICT (rule_id)
            DO UPDATE SET next_index = automation_rule_cursors.next_index + 1
            RETURNING next_index - 1
            "#,
        )
        .bind(rule_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to advance round-robin cursor of rule '{rule_id}': {error}"
            ))
        })?;

        u64::try_from(current).map_err(|error| {
            AppError::Internal(format!(
                "invalid round-robin cursor value for rule '{rule_id}': {error}"
            ))
        })
    }
}

fn stored_trigger_key(board_id: BoardId, value: &str) -> AppResult<TriggerHandlerKey> {
    value.parse::<TriggerHandlerKey>().map_err(|error| {
        AppError::Internal(format!(
            "scheduled rule on board '{board_id}' has invalid handler key: {error}"
        ))
    })
}

fn rule_from_row(row: RuleRow) -> AppResult<Rule> {
    let details: RuleDetails = serde_json::from_value(row.details).map_err(|error| {
        AppError::Internal(format!(
            "stored automation rule '{}' has invalid details: {error}",
            row.id
        ))
    })?;

    Ok(Rule::new(RuleInput {
        id: RuleId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        creator_id: UserId::new(row.creator_id)?,
        details,
        is_enabled: row.is_enabled,
        is_deleted: row.is_deleted,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
