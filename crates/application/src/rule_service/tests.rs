use std::sync::Arc;

use lanewright_core::{AppError, BoardId, RuleId};
use lanewright_domain::{
    ActionPayload, ActorRelation, AutomationCategory, BoardRole, CompletionStatus, ListPlacement,
    TemplateFields, TriggerPayload, UiField, UiFieldMap, WeekDay,
};
use serde_json::json;

use crate::test_support::{FakeBoardRepository, FakeRuleRepository, actor};

use super::{CreateRuleInput, RuleService};

struct Harness {
    boards: Arc<FakeBoardRepository>,
    rules: Arc<FakeRuleRepository>,
    service: RuleService,
}

fn harness() -> Harness {
    let boards = Arc::new(FakeBoardRepository::default());
    let rules = Arc::new(FakeRuleRepository::default());
    let service = RuleService::new(rules.clone(), boards.clone());

    Harness {
        boards,
        rules,
        service,
    }
}

fn complete_on_create() -> Vec<ActionPayload> {
    vec![ActionPayload::MarkCardStatus {
        status: CompletionStatus::Complete,
    }]
}

fn field(kind: &str, value: serde_json::Value) -> UiField {
    UiField {
        kind: kind.to_owned(),
        value,
    }
}

#[tokio::test]
async fn members_without_admin_role_cannot_create_rules() {
    let harness = harness();
    let board = harness.boards.add_board("roadmap", "u1").await;
    harness
        .boards
        .add_member(board.id, "u2", BoardRole::Member)
        .await;

    let result = harness
        .service
        .create_rule(
            &actor("u2"),
            CreateRuleInput {
                board_id: board.id,
                trigger: TriggerPayload::WhenCardCreated {
                    by: ActorRelation::Anyone,
                },
                actions: complete_on_create(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(harness.rules.all().await.is_empty());
}

#[tokio::test]
async fn unknown_board_is_not_found() {
    let harness = harness();

    let result = harness
        .service
        .create_rule(
            &actor("u1"),
            CreateRuleInput {
                board_id: BoardId::new(),
                trigger: TriggerPayload::WhenCardCreated {
                    by: ActorRelation::Me,
                },
                actions: complete_on_create(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn admin_creates_x_weeks_rule_with_stamped_anchor() {
    let harness = harness();
    let board = harness.boards.add_board("roadmap", "u1").await;
    harness
        .boards
        .add_member(board.id, "u2", BoardRole::Admin)
        .await;
    let backlog = harness.boards.add_list(board.id, "Backlog", 0).await;

    let rule = harness
        .service
        .create_rule(
            &actor("u2"),
            CreateRuleInput {
                board_id: board.id,
                trigger: TriggerPayload::WhenScheduledXWeeks {
                    weeks: 2,
                    day: WeekDay::Fri,
                    anchor_week: None,
                },
                actions: vec![ActionPayload::MoveSelectedList {
                    list_id: backlog.id,
                    position: ListPlacement::First,
                }],
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(rule.category(), AutomationCategory::Scheduled);
    assert_eq!(rule.creator_id().as_str(), "u2");
    assert!(matches!(
        rule.details().trigger(),
        TriggerPayload::WhenScheduledXWeeks {
            anchor_week: Some(_),
            ..
        }
    ));
    assert_eq!(harness.rules.all().await.len(), 1);
}

#[tokio::test]
async fn card_actions_need_a_card_trigger() {
    let harness = harness();
    let board = harness.boards.add_board("roadmap", "u1").await;

    let result = harness
        .service
        .create_rule(
            &actor("u1"),
            CreateRuleInput {
                board_id: board.id,
                trigger: TriggerPayload::WhenListCreated {
                    by: ActorRelation::Anyone,
                },
                actions: complete_on_create(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn lists_of_other_boards_are_rejected() {
    let harness = harness();
    let board = harness.boards.add_board("roadmap", "u1").await;
    let other = harness.boards.add_board("ops", "u1").await;
    let foreign = harness.boards.add_list(other.id, "Foreign", 0).await;

    let result = harness
        .service
        .create_rule(
            &actor("u1"),
            CreateRuleInput {
                board_id: board.id,
                trigger: TriggerPayload::WhenCardAddedToList {
                    list_id: foreign.id,
                    by: ActorRelation::Anyone,
                },
                actions: complete_on_create(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn rule_builder_fields_create_rule_and_render_sentence() {
    let harness = harness();
    let board = harness.boards.add_board("roadmap", "u1").await;
    let done = harness.boards.add_list(board.id, "Done", 0).await;

    let trigger = TemplateFields {
        template_id: "when-card-added-to-list".to_owned(),
        fields: UiFieldMap::from([
            (
                "trigger-card-added-to-list-listId".to_owned(),
                field("list-combobox", json!(done.id.to_string())),
            ),
            (
                "trigger-card-added-to-list-by".to_owned(),
                field("select", json!("ANYONE")),
            ),
        ]),
    };
    let action = TemplateFields {
        template_id: "mark-card-status".to_owned(),
        fields: UiFieldMap::from([(
            "action-mark-card-status-status".to_owned(),
            field("select", json!("complete")),
        )]),
    };

    harness
        .service
        .create_rule_from_fields(&actor("u1"), board.id, &trigger, &[action])
        .await
        .unwrap_or_else(|_| unreachable!());

    let summaries = harness
        .service
        .list_rule_summaries(&actor("u1"), board.id, AutomationCategory::Rule)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(summaries.len(), 1);
    assert_eq!(
        summaries[0].sentence,
        "When a card is added to list \"Done\" by anyone, mark the card as complete."
    );
}

#[tokio::test]
async fn invalid_builder_fields_are_validation_errors() {
    let harness = harness();
    let board = harness.boards.add_board("roadmap", "u1").await;

    let trigger = TemplateFields {
        template_id: "when-card-created".to_owned(),
        fields: UiFieldMap::from([(
            "trigger-card-created-by".to_owned(),
            field("select", json!("EVERYONE")),
        )]),
    };

    let result = harness
        .service
        .create_rule_from_fields(&actor("u1"), board.id, &trigger, &[])
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn disabled_and_deleted_rules_leave_listing() {
    let harness = harness();
    let board = harness.boards.add_board("roadmap", "u1").await;
    let create = || CreateRuleInput {
        board_id: board.id,
        trigger: TriggerPayload::WhenCardCreated {
            by: ActorRelation::Anyone,
        },
        actions: complete_on_create(),
    };
    let first = harness
        .service
        .create_rule(&actor("u1"), create())
        .await
        .unwrap_or_else(|_| unreachable!());
    let second = harness
        .service
        .create_rule(&actor("u1"), create())
        .await
        .unwrap_or_else(|_| unreachable!());

    let disabled = harness
        .service
        .set_rule_enabled(&actor("u1"), first.id(), false)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(!disabled.is_enabled());

    harness
        .service
        .delete_rule(&actor("u1"), second.id())
        .await
        .unwrap_or_else(|_| unreachable!());

    let listed = harness
        .service
        .list_rules(&actor("u1"), board.id, AutomationCategory::Rule)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(listed.is_empty());

    let deleted_again = harness.service.delete_rule(&actor("u1"), second.id()).await;
    assert!(matches!(deleted_again, Err(AppError::NotFound(_))));
    let missing = harness
        .service
        .set_rule_enabled(&actor("u1"), RuleId::new(), true)
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn non_members_cannot_list_rules() {
    let harness = harness();
    let board = harness.boards.add_board("roadmap", "u1").await;

    let result = harness
        .service
        .list_rules(&actor("u9"), board.id, AutomationCategory::Rule)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}
