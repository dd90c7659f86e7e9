use super::*;

impl PostgresBoardRepository {
    pub(super) async fn find_card_impl(&self, card_id: CardId) -> AppResult<Option<Card>> {
        let row = sqlx::query_as::<_, CardRow>(&format!(
            "{CARD_SELECT} WHERE cards.id = $1 GROUP BY cards.id"
        ))
        .bind(card_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load card '{card_id}': {error}")))?;

        row.map(card_from_row).transpose()
    }

    pub(super) async fn list_cards_impl(&self, list_id: ListId) -> AppResult<Vec<Card>> {
        let rows = sqlx::query_as::<_, CardRow>(&format!(
            r#"
            {CARD_SELECT}
            WHERE cards.list_id = $1
            GROUP BY cards.id
            ORDER BY cards.position ASC, cards.created_at ASC
            "#
        ))
        .bind(list_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list cards of list '{list_id}': {error}"))
        })?;

        rows.into_iter().map(card_from_row).collect()
    }

    pub(super) async fn create_card_impl(&self, card: NewCard) -> AppResult<Card> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start card create transaction: {error}"))
        })?;

        let inserted = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO cards (
                id,
                board_id,
                list_id,
                title,
                description,
                position,
                is_completed,
                idempotency_key
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (idempotency_key)
            DO NOTHING
            RETURNING id
            "#,
        )
        .bind(CardId::new().as_uuid())
        .bind(card.board_id.as_uuid())
        .bind(card.list_id.as_uuid())
        .bind(card.title.as_str())
        .bind(card.description.as_deref())
        .bind(card.position)
        .bind(card.is_completed)
        .bind(card.idempotency_key.as_deref())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to create card in list '{}': {error}",
                card.list_id
            ))
        })?;

        let card_id = match inserted {
            Some(card_id) => {
                for user_id in &card.assignee_ids {
                    sqlx::query(
                        r#"
                        INSERT INTO card_assignees (card_id, user_id)
                        VALUES ($1, $2)
                        ON CONFLICT (card_id, user_id) DO NOTHING
                        "#,
                    )
                    .bind(card_id)
                    .bind(user_id.as_str())
                    .execute(&mut *transaction)
                    .await
                    .map_err(|error| {
                        AppError::Internal(format!(
                            "failed to copy assignee '{user_id}' to card '{card_id}': {error}"
                        ))
                    })?;
                }
                card_id
            }
            None => sqlx::query_scalar::<_, uuid::Uuid>(
                "SELECT id FROM cards WHERE idempotency_key = $1",
            )
            .bind(card.idempotency_key.as_deref())
            .fetch_one(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to load card created under idempotency key: {error}"
                ))
            })?,
        };

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit card create transaction: {error}"))
        })?;

        let card_id = CardId::from_uuid(card_id);
        self.find_card_impl(card_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("created card '{card_id}' disappeared")))
    }

    pub(super) async fn place_card_impl(&self, placement: CardPlacement) -> AppResult<Card> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET list_id = $2, position = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(placement.card_id.as_uuid())
        .bind(placement.list_id.as_uuid())
        .bind(placement.position)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to place card '{}': {error}",
                placement.card_id
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "card '{}' not found",
                placement.card_id
            )));
        }

        self.require_card(placement.card_id).await
    }

    pub(super) async fn reposition_cards_impl(
        &self,
        placements: Vec<CardPlacement>,
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start card reposition transaction: {error}"))
        })?;

        for placement in placements {
            sqlx::query(
                r#"
                UPDATE cards
                SET list_id = $2, position = $3, updated_at = now()
                WHERE id = $1
                "#,
            )
            .bind(placement.card_id.as_uuid())
            .bind(placement.list_id.as_uuid())
            .bind(placement.position)
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to reposition card '{}': {error}",
                    placement.card_id
                ))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit card reposition transaction: {error}"))
        })
    }

    pub(super) async fn set_card_completion_impl(
        &self,
        card_id: CardId,
        is_completed: bool,
    ) -> AppResult<Card> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET is_completed = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(card_id.as_uuid())
        .bind(is_completed)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update completion of card '{card_id}': {error}"
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("card '{card_id}' not found")));
        }

        self.require_card(card_id).await
    }

    pub(super) async fn add_card_assignee_impl(
        &self,
        card_id: CardId,
        user_id: &UserId,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO card_assignees (card_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (card_id, user_id) DO NOTHING
            "#,
        )
        .bind(card_id.as_uuid())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to assign '{user_id}' to card '{card_id}': {error}"
            ))
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn require_card(&self, card_id: CardId) -> AppResult<Card> {
        self.find_card_impl(card_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("card '{card_id}' not found")))
    }
}
