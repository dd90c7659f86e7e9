use async_trait::async_trait;
use lanewright_core::{AppResult, BoardId, CardId, ListId, UserId};
use lanewright_domain::{Board, BoardList, BoardMember, Card};

/// New list payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    /// Owning board.
    pub board_id: BoardId,
    /// List title.
    pub title: String,
    /// Sort position.
    pub position: i64,
}

/// New card payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    /// Owning board.
    pub board_id: BoardId,
    /// Target list.
    pub list_id: ListId,
    /// Card title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Sort position inside the list.
    pub position: i64,
    /// Initial completion flag.
    pub is_completed: bool,
    /// Initial assignees.
    pub assignee_ids: Vec<UserId>,
    /// When set, a second create with the same key returns the first card.
    pub idempotency_key: Option<String>,
}

/// Target list and position of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPlacement {
    /// Card to place.
    pub card_id: CardId,
    /// Containing list.
    pub list_id: ListId,
    /// Position inside the list.
    pub position: i64,
}

/// Position of one list on its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPosition {
    /// List to place.
    pub list_id: ListId,
    /// Position on the board.
    pub position: i64,
}

/// Repository port for boards, lists, cards and members.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Returns one board.
    async fn find_board(&self, board_id: BoardId) -> AppResult<Option<Board>>;

    /// Returns one membership.
    async fn find_member(
        &self,
        board_id: BoardId,
        user_id: &UserId,
    ) -> AppResult<Option<BoardMember>>;

    /// Lists board members by ascending join time.
    async fn list_members(&self, board_id: BoardId) -> AppResult<Vec<BoardMember>>;

    /// Returns one list.
    async fn find_list(&self, list_id: ListId) -> AppResult<Option<BoardList>>;

    /// Lists a board's lists by ascending position.
    async fn list_lists(&self, board_id: BoardId) -> AppResult<Vec<BoardList>>;

    /// Returns one card.
    async fn find_card(&self, card_id: CardId) -> AppResult<Option<Card>>;

    /// Lists a list's cards by ascending position.
    async fn list_cards(&self, list_id: ListId) -> AppResult<Vec<Card>>;

    /// Creates a list.
    async fn create_list(&self, list: NewList) -> AppResult<BoardList>;

    /// Creates a card, or returns the card created earlier under the same idempotency key.
    async fn create_card(&self, card: NewCard) -> AppResult<Card>;

    /// Moves one card to a list and position.
    async fn place_card(&self, placement: CardPlacement) -> AppResult<Card>;

    /// Applies several card placements in one transaction.
    async fn reposition_cards(&self, placements: Vec<CardPlacement>) -> AppResult<()>;

    /// Updates one list position.
    async fn set_list_position(&self, position: ListPosition) -> AppResult<BoardList>;

    /// Applies several list positions in one transaction.
    async fn reposition_lists(&self, positions: Vec<ListPosition>) -> AppResult<()>;

    /// Updates the card completion flag.
    async fn set_card_completion(&self, card_id: CardId, is_completed: bool) -> AppResult<Card>;

    /// Assigns a member to a card; returns `false` when already assigned.
    async fn add_card_assignee(&self, card_id: CardId, user_id: &UserId) -> AppResult<bool>;
}
