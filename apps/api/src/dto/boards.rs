use lanewright_core::ListId;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
}

/// Drop target of a dragged list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveListRequest {
    pub to_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Drop target of a dragged card.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    pub to_list_id: ListId,
    pub to_index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardCompletionRequest {
    pub is_completed: bool,
}
