use std::str::FromStr;

use chrono::{DateTime, Utc};
use lanewright_core::{AppError, BoardId, CardId, ListId, UserId};
use serde::{Deserialize, Serialize};

/// Kanban board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Board id.
    pub id: BoardId,
    /// URL slug; also names the realtime channel.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Board owner.
    pub owner_id: UserId,
}

impl Board {
    /// Returns the realtime channel for this board.
    #[must_use]
    pub fn channel(&self) -> String {
        format!("board:{}", self.slug)
    }
}

/// Role of a board member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardRole {
    /// Board owner.
    Owner,
    /// Board administrator.
    Admin,
    /// Regular member.
    Member,
}

impl BoardRole {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Returns whether the role may manage automation rules.
    #[must_use]
    pub fn can_manage_automations(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

impl FromStr for BoardRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(AppError::Validation(format!("unknown board role '{value}'"))),
        }
    }
}

/// Board membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    /// Member user id.
    pub user_id: UserId,
    /// Name shown in rule sentences.
    pub display_name: String,
    /// Member role.
    pub role: BoardRole,
    /// Join timestamp; orders round-robin assignment.
    pub joined_at: DateTime<Utc>,
}

/// Ordered list of cards on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    /// List id.
    pub id: ListId,
    /// Owning board.
    pub board_id: BoardId,
    /// Display title.
    pub title: String,
    /// Sort position among the board's lists.
    pub position: i64,
}

/// Card inside a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Card id.
    pub id: CardId,
    /// Owning board.
    pub board_id: BoardId,
    /// Containing list.
    pub list_id: ListId,
    /// Card title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Sort position inside the list.
    pub position: i64,
    /// Completion flag.
    pub is_completed: bool,
    /// Assigned members.
    pub assignee_ids: Vec<UserId>,
}
