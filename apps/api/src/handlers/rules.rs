use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use lanewright_application::{CreateRuleInput, RuleSummary};
use lanewright_core::{ActorIdentity, BoardId, RuleId};
use lanewright_domain::Rule;

use crate::dto::{
    CreateRuleFromFieldsRequest, CreateRuleRequest, RuleCategoryQuery, UpdateRuleEnabledRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_rules_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<BoardId>,
    Query(query): Query<RuleCategoryQuery>,
) -> ApiResult<Json<Vec<RuleSummary>>> {
    let rules = state
        .rule_service
        .list_rule_summaries(&actor, board_id, query.category())
        .await?;

    Ok(Json(rules))
}

pub async fn create_rule_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<BoardId>,
    Json(payload): Json<CreateRuleRequest>,
) -> ApiResult<(StatusCode, Json<Rule>)> {
    let rule = state
        .rule_service
        .create_rule(
            &actor,
            CreateRuleInput {
                board_id,
                trigger: payload.trigger,
                actions: payload.actions,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(rule)))
}

pub async fn create_rule_from_fields_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<BoardId>,
    Json(payload): Json<CreateRuleFromFieldsRequest>,
) -> ApiResult<(StatusCode, Json<Rule>)> {
    let rule = state
        .rule_service
        .create_rule_from_fields(&actor, board_id, &payload.trigger, &payload.actions)
        .await?;

    Ok((StatusCode::CREATED, Json(rule)))
}

pub async fn update_rule_enabled_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(rule_id): Path<RuleId>,
    Json(payload): Json<UpdateRuleEnabledRequest>,
) -> ApiResult<Json<Rule>> {
    let rule = state
        .rule_service
        .set_rule_enabled(&actor, rule_id, payload.is_enabled)
        .await?;

    Ok(Json(rule))
}

pub async fn delete_rule_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(rule_id): Path<RuleId>,
) -> ApiResult<StatusCode> {
    state.rule_service.delete_rule(&actor, rule_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
