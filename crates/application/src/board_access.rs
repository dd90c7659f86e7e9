use lanewright_core::{ActorIdentity, AppError, AppResult, BoardId};
use lanewright_domain::{Board, BoardMember};

use crate::automation_ports::BoardRepository;

/// Loads a board the actor is a member of.
pub(crate) async fn require_member(
    boards: &dyn BoardRepository,
    actor: &ActorIdentity,
    board_id: BoardId,
) -> AppResult<(Board, BoardMember)> {
    let board = boards
        .find_board(board_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("board '{board_id}' not found")))?;

    let member = boards
        .find_member(board_id, actor.user_id())
        .await?
        .ok_or_else(|| {
            AppError::Forbidden(format!(
                "user '{}' is not a member of board '{board_id}'",
                actor.user_id()
            ))
        })?;

    Ok((board, member))
}

/// Loads a board the actor owns or administers.
pub(crate) async fn require_manager(
    boards: &dyn BoardRepository,
    actor: &ActorIdentity,
    board_id: BoardId,
) -> AppResult<Board> {
    let (board, member) = require_member(boards, actor, board_id).await?;

    if board.owner_id != *actor.user_id() && !member.role.can_manage_automations() {
        return Err(AppError::Forbidden(format!(
            "user '{}' cannot manage automations of board '{board_id}'",
            actor.user_id()
        )));
    }

    Ok(board)
}
