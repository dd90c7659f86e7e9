use super::*;

impl PostgresBoardRepository {
    pub(super) async fn find_list_impl(&self, list_id: ListId) -> AppResult<Option<BoardList>> {
        let row = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT id, board_id, title, position
            FROM board_lists
            WHERE id = $1
            "#,
        )
        .bind(list_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load list '{list_id}': {error}")))?;

        Ok(row.map(list_from_row))
    }

    pub(super) async fn list_lists_impl(&self, board_id: BoardId) -> AppResult<Vec<BoardList>> {
        let rows = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT id, board_id, title, position
            FROM board_lists
            WHERE board_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(board_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list lists of board '{board_id}': {error}"))
        })?;

        Ok(rows.into_iter().map(list_from_row).collect())
    }

    pub(super) async fn create_list_impl(&self, list: NewList) -> AppResult<BoardList> {
        let row = sqlx::query_as::<_, ListRow>(
            r#"
            INSERT INTO board_lists (id, board_id, title, position)
            VALUES ($1, $2, $3, $4)
            RETURNING id, board_id, title, position
            "#,
        )
        .bind(ListId::new().as_uuid())
        .bind(list.board_id.as_uuid())
        .bind(list.title.as_str())
        .bind(list.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to create list on board '{}': {error}",
                list.board_id
            ))
        })?;

        Ok(list_from_row(row))
    }

    pub(super) async fn set_list_position_impl(
        &self,
        position: ListPosition,
    ) -> AppResult<BoardList> {
        let row = sqlx::query_as::<_, ListRow>(
            r#"
            UPDATE board_lists
            SET position = $2
            WHERE id = $1
            RETURNING id, board_id, title, position
            "#,
        )
        .bind(position.list_id.as_uuid())
        .bind(position.position)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to move list '{}': {error}",
                position.list_id
            ))
        })?
        .ok_or_else(|| AppError::NotFound(format!("list '{}' not found", position.list_id)))?;

        Ok(list_from_row(row))
    }

    pub(super) async fn reposition_lists_impl(
        &self,
        positions: Vec<ListPosition>,
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start list reposition transaction: {error}"))
        })?;

        for position in positions {
            sqlx::query("UPDATE board_lists SET position = $2 WHERE id = $1")
                .bind(position.list_id.as_uuid())
                .bind(position.position)
                .execute(&mut *transaction)
                .await
                .map_err(|error| {
                    AppError::Internal(format!(
                        "failed to reposition list '{}': {error}",
                        position.list_id
                    ))
                })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit list reposition transaction: {error}"))
        })
    }
}
