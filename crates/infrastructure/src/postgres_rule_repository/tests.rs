use chrono::{Duration, Utc};
use lanewright_application::RuleRepository;
use lanewright_core::{AppError, BoardId, ListId, RuleId, UserId};
use lanewright_domain::{
    ActionPayload, ActorRelation, AutomationCategory, CompletionStatus, DailyInterval,
    ListPlacement, Rule, RuleDetails, RuleInput, TriggerHandlerKey, TriggerPayload,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{PostgresRuleRepository, stored_trigger_key};
use crate::MIGRATOR;

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres rule repository tests: {error}");
    }

    Some(pool)
}

async fn ensure_board(pool: &PgPool, board_id: BoardId) {
    let insert = sqlx::query(
        r#"
            INSERT INTO boards (id, slug, title, owner_id)
            VALUES ($1, $2, 'Rules', 'owner-1')
            ON CONFLICT (id) DO NOTHING
            "#,
    )
    .bind(board_id.as_uuid())
    .bind(format!("rules-{board_id}"))
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

fn new_rule(
    board_id: BoardId,
    trigger: TriggerPayload,
    actions: Vec<ActionPayload>,
    offset: i64,
) -> Rule {
    let created_at = Utc::now() + Duration::seconds(offset);
    Rule::new(RuleInput {
        id: RuleId::new(),
        board_id,
        creator_id: UserId::new("owner-1").unwrap_or_else(|_| unreachable!()),
        details: RuleDetails::new(trigger, actions).unwrap_or_else(|_| unreachable!()),
        is_enabled: true,
        is_deleted: false,
        created_at,
        updated_at: created_at,
    })
}

fn mark_complete_on_create(board_id: BoardId, offset: i64) -> Rule {
    new_rule(
        board_id,
        TriggerPayload::WhenCardCreated {
            by: ActorRelation::Anyone,
        },
        vec![ActionPayload::MarkCardStatus {
            status: CompletionStatus::Complete,
        }],
        offset,
    )
}

#[tokio::test]
async fn active_rules_round_trip_in_creation_order() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresRuleRepository::new(pool.clone());
    let board_id = BoardId::new();
    ensure_board(&pool, board_id).await;

    let later = mark_complete_on_create(board_id, 5);
    let earlier = mark_complete_on_create(board_id, 0);
    let removed = mark_complete_on_create(board_id, 10);
    for rule in [later.clone(), earlier.clone(), removed.clone()] {
        assert!(repository.create_rule(rule).await.is_ok());
    }
    assert!(repository.soft_delete_rule(removed.id(), Utc::now()).await.is_ok());

    let listed = repository
        .list_active_rules(board_id, AutomationCategory::Rule)
        .await
        .unwrap_or_else(|_| unreachable!());
    let ids: Vec<RuleId> = listed.iter().map(Rule::id).collect();
    assert_eq!(ids, vec![earlier.id(), later.id()]);
    assert_eq!(listed[0].details(), earlier.details());

    let disabled = repository
        .set_rule_enabled(later.id(), false, Utc::now())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(!disabled.is_enabled());

    let second_delete = repository.soft_delete_rule(removed.id(), Utc::now()).await;
    assert!(second_delete.is_err());
}

#[tokio::test]
async fn undecodable_rule_is_skipped_while_listing_and_reported_on_lookup() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresRuleRepository::new(pool.clone());
    let board_id = BoardId::new();
    ensure_board(&pool, board_id).await;

    let healthy = mark_complete_on_create(board_id, 5);
    assert!(repository.create_rule(healthy.clone()).await.is_ok());

    let corrupt_id = RuleId::new();
    let insert = sqlx::query(
        r#"
            INSERT INTO automation_rules (
                id, board_id, creator_id, category, handler_key, details, created_at, updated_at
            )
            VALUES ($1, $2, 'owner-1', 'rule', 'WHEN_CARD_CREATED', $3, $4, $4)
            "#,
    )
    .bind(corrupt_id.as_uuid())
    .bind(board_id.as_uuid())
    .bind(serde_json::json!({
        "trigger": {"handlerKey": "WHEN_CARD_CREATED", "category": "rule", "by": "NOBODY"},
        "actions": [{"handlerKey": "MARK_CARD_STATUS", "status": "complete"}]
    }))
    .bind(Utc::now())
    .execute(&pool)
    .await;
    assert!(insert.is_ok());

    let listed = repository
        .list_active_rules(board_id, AutomationCategory::Rule)
        .await
        .unwrap_or_else(|_| unreachable!());
    let ids: Vec<RuleId> = listed.iter().map(Rule::id).collect();
    assert_eq!(ids, vec![healthy.id()]);

    assert!(repository.find_rule(corrupt_id).await.is_err());
}

#[tokio::test]
async fn scheduled_index_and_round_robin_cursor() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresRuleRepository::new(pool.clone());
    let board_id = BoardId::new();
    ensure_board(&pool, board_id).await;

    let scheduled = new_rule(
        board_id,
        TriggerPayload::WhenScheduledDaily {
            interval: DailyInterval::Weekday,
        },
        vec![ActionPayload::MoveSelectedList {
            list_id: ListId::new(),
            position: ListPlacement::Last,
        }],
        0,
    );
    assert!(repository.create_rule(scheduled.clone()).await.is_ok());

    let index = repository
        .scheduled_rule_index()
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(index.daily.contains(&board_id));
    assert!(!index.weekly.contains(&board_id));

    let draws: Vec<u64> = [
        repository.advance_round_robin_cursor(scheduled.id()).await,
        repository.advance_round_robin_cursor(scheduled.id()).await,
        repository.advance_round_robin_cursor(scheduled.id()).await,
    ]
    .into_iter()
    .map(|draw| draw.unwrap_or_else(|_| unreachable!()))
    .collect();
    assert_eq!(draws, vec![0, 1, 2]);
}

#[test]
fn unknown_stored_handler_key_is_an_internal_error() {
    let board_id = BoardId::new();

    assert!(matches!(
        stored_trigger_key(board_id, "WHEN_SCHEDULED_WEEKLY"),
        Ok(TriggerHandlerKey::WhenScheduledWeekly)
    ));
    assert!(matches!(
        stored_trigger_key(board_id, "WHEN_SCHEDULED_HOURLY"),
        Err(AppError::Internal(_))
    ));
}
