use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use lanewright_core::{ActorIdentity, BoardId, CardId, ListId};
use lanewright_domain::{BoardList, Card};

use crate::dto::{
    CreateCardRequest, CreateListRequest, MoveCardRequest, MoveListRequest,
    UpdateCardCompletionRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_list_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<BoardId>,
    Json(payload): Json<CreateListRequest>,
) -> ApiResult<(StatusCode, Json<BoardList>)> {
    let list = state
        .board_service
        .create_list(&actor, board_id, payload.title.as_str())
        .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn move_list_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(list_id): Path<ListId>,
    Json(payload): Json<MoveListRequest>,
) -> ApiResult<Json<Vec<BoardList>>> {
    let lists = state
        .board_service
        .move_list(&actor, list_id, payload.to_index)
        .await?;

    Ok(Json(lists))
}

pub async fn create_card_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(list_id): Path<ListId>,
    Json(payload): Json<CreateCardRequest>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    let card = state
        .board_service
        .create_card(&actor, list_id, payload.title.as_str(), payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn move_card_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(card_id): Path<CardId>,
    Json(payload): Json<MoveCardRequest>,
) -> ApiResult<Json<Card>> {
    let card = state
        .board_service
        .move_card(&actor, card_id, payload.to_list_id, payload.to_index)
        .await?;

    Ok(Json(card))
}

pub async fn update_card_completion_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(card_id): Path<CardId>,
    Json(payload): Json<UpdateCardCompletionRequest>,
) -> ApiResult<Json<Card>> {
    let card = state
        .board_service
        .set_card_completion(&actor, card_id, payload.is_completed)
        .await?;

    Ok(Json(card))
}
