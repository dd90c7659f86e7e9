use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lanewright_application::{
    BoardRepository, CardPlacement, ListPosition, NewCard, NewList,
};
use lanewright_core::{AppError, AppResult, BoardId, CardId, ListId, UserId};
use lanewright_domain::{Board, BoardList, BoardMember, BoardRole, Card};
use sqlx::{FromRow, PgPool};

mod cards;
mod lists;

/// PostgreSQL-backed board, list and card repository.
#[derive(Clone)]
pub struct PostgresBoardRepository {
    pool: PgPool,
}

impl PostgresBoardRepository {
    /// Creates a board repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BoardRow {
    id: uuid::Uuid,
    slug: String,
    title: String,
    owner_id: String,
}

#[derive(Debug, FromRow)]
struct MemberRow {
    user_id: String,
    display_name: String,
    role: String,
    joined_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ListRow {
    id: uuid::Uuid,
    board_id: uuid::Uuid,
    title: String,
    position: i64,
}

#[derive(Debug, FromRow)]
struct CardRow {
    id: uuid::Uuid,
    board_id: uuid::Uuid,
    list_id: uuid::Uuid,
    title: String,
    description: Option<String>,
    position: i64,
    is_completed: bool,
    assignee_ids: Vec<String>,
}

const CARD_SELECT: &str = r#"
    SELECT
        cards.id,
        cards.board_id,
        cards.list_id,
        cards.title,
        cards.description,
        cards.position,
        cards.is_completed,
        COALESCE(
            array_agg(assignees.user_id ORDER BY assignees.assigned_at)
                FILTER (WHERE assignees.user_id IS NOT NULL),
            '{}'
        ) AS assignee_ids
    FROM cards
    LEFT JOIN card_assignees assignees ON assignees.card_id = cards.id
"#;

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn find_board(&self, board_id: BoardId) -> AppResult<Option<Board>> {
        let row = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT id, slug, title, owner_id
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(board_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load board '{board_id}': {error}"))
        })?;

        row.map(|row| {
            Ok(Board {
                id: BoardId::from_uuid(row.id),
                slug: row.slug,
                title: row.title,
                owner_id: UserId::new(row.owner_id)?,
            })
        })
        .transpose()
    }

    async fn find_member(
        &self,
        board_id: BoardId,
        user_id: &UserId,
    ) -> AppResult<Option<BoardMember>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT user_id, display_name, role, joined_at
            FROM board_members
            WHERE board_id = $1 AND user_id = $2
            "#,
        )
        .bind(board_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load membership of '{user_id}' on board '{board_id}': {error}"
            ))
        })?;

        row.map(member_from_row).transpose()
    }

    async fn list_members(&self, board_id: BoardId) -> AppResult<Vec<BoardMember>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT user_id, display_name, role, joined_at
            FROM board_members
            WHERE board_id = $1
            ORDER BY joined_at ASC, user_id ASC
            "#,
        )
        .bind(board_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list members of board '{board_id}': {error}"))
        })?;

        rows.into_iter().map(member_from_row).collect()
    }

    async fn find_list(&self, list_id: ListId) -> AppResult<Option<BoardList>> {
        self.find_list_impl(list_id).await
    }

    async fn list_lists(&self, board_id: BoardId) -> AppResult<Vec<BoardList>> {
        self.list_lists_impl(board_id).await
    }

    async fn find_card(&self, card_id: CardId) -> AppResult<Option<Card>> {
        self.find_card_impl(card_id).await
    }

    async fn list_cards(&self, list_id: ListId) -> AppResult<Vec<Card>> {
        self.list_cards_impl(list_id).await
    }

    async fn create_list(&self, list: NewList) -> AppResult<BoardList> {
        self.create_list_impl(list).await
    }

    async fn create_card(&self, card: NewCard) -> AppResult<Card> {
        self.create_card_impl(card).await
    }

    async fn place_card(&self, placement: CardPlacement) -> AppResult<Card> {
        self.place_card_impl(placement).await
    }

    async fn reposition_cards(&self, placements: Vec<CardPlacement>) -> AppResult<()> {
        self.reposition_cards_impl(placements).await
    }

    async fn set_list_position(&self, position: ListPosition) -> AppResult<BoardList> {
        self.set_list_position_impl(position).await
    }

    async fn reposition_lists(&self, positions: Vec<ListPosition>) -> AppResult<()> {
        self.reposition_lists_impl(positions).await
    }

    async fn set_card_completion(&self, card_id: CardId, is_completed: bool) -> AppResult<Card> {
        self.set_card_completion_impl(card_id, is_completed).await
    }

    async fn add_card_assignee(&self, card_id: CardId, user_id: &UserId) -> AppResult<bool> {
        self.add_card_assignee_impl(card_id, user_id).await
    }
}

fn member_from_row(row: MemberRow) -> AppResult<BoardMember> {
    Ok(BoardMember {
        user_id: UserId::new(row.user_id)?,
        display_name: row.display_name,
        role: row.role.parse::<BoardRole>()?,
        joined_at: row.joined_at,
    })
}

fn list_from_row(row: ListRow) -> BoardList {
    BoardList {
        id: ListId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        title: row.title,
        position: row.position,
    }
}

fn card_from_row(row: CardRow) -> AppResult<Card> {
    Ok(Card {
        id: CardId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        list_id: ListId::from_uuid(row.list_id),
        title: row.title,
        description: row.description,
        position: row.position,
        is_completed: row.is_completed,
        assignee_ids: row
            .assignee_ids
            .into_iter()
            .map(UserId::new)
            .collect::<AppResult<Vec<_>>>()?,
    })
}
