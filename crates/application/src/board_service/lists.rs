use super::*;

impl BoardService {
    /// Appends a list to a board and emits `list.created`.
    pub async fn create_list(
        &self,
        actor: &ActorIdentity,
        board_id: BoardId,
        title: &str,
    ) -> AppResult<BoardList> {
        let (board, _) = require_member(self.boards.as_ref(), actor, board_id).await?;
        let title = NonEmptyString::new(title.trim())?;
        let lists = self.boards.list_lists(board.id).await?;

        let list = self
            .boards
            .create_list(NewList {
                board_id: board.id,
                title: title.into(),
                position: next_dense_position(lists.last().map(|list| list.position)),
            })
            .await?;

        self.emit(DomainEvent::ListCreated {
            board_id: board.id,
            actor_user_id: actor.user_id().clone(),
            list_id: list.id,
        })
        .await?;

        Ok(list)
    }

    /// Moves a list to `to_index` and renumbers the board's lists densely.
    pub async fn move_list(
        &self,
        actor: &ActorIdentity,
        list_id: ListId,
        to_index: usize,
    ) -> AppResult<Vec<BoardList>> {
        let list = self.require_list(list_id).await?;
        require_member(self.boards.as_ref(), actor, list.board_id).await?;

        let lists = self.boards.list_lists(list.board_id).await?;
        let from = lists
            .iter()
            .position(|candidate| candidate.id == list.id)
            .ok_or_else(|| AppError::NotFound(format!("list '{list_id}' not found")))?;

        let mut lists = reorder_within(lists, from, to_index)?;
        let positions = dense_positions(lists.len());
        for (list, position) in lists.iter_mut().zip(positions) {
            list.position = position;
        }

        self.boards
            .reposition_lists(
                lists
                    .iter()
                    .map(|list| ListPosition {
                        list_id: list.id,
                        position: list.position,
                    })
                    .collect(),
            )
            .await?;

        Ok(lists)
    }
}
