use super::*;

impl BoardService {
    /// Appends a card to a list and emits `card.created`.
    pub async fn create_card(
        &self,
        actor: &ActorIdentity,
        list_id: ListId,
        title: &str,
        description: Option<String>,
    ) -> AppResult<Card> {
        let list = self.require_list(list_id).await?;
        require_member(self.boards.as_ref(), actor, list.board_id).await?;
        let title = NonEmptyString::new(title.trim())?;
        let cards = self.boards.list_cards(list.id).await?;

        let card = self
            .boards
            .create_card(NewCard {
                board_id: list.board_id,
                list_id: list.id,
                title: title.into(),
                description: description.filter(|value| !value.trim().is_empty()),
                position: next_dense_position(cards.last().map(|card| card.position)),
                is_completed: false,
                assignee_ids: Vec::new(),
                idempotency_key: None,
            })
            .await?;

        self.emit(DomainEvent::CardCreated {
            board_id: card.board_id,
            actor_user_id: actor.user_id().clone(),
            card_id: card.id,
            list_id: card.list_id,
        })
        .await?;

        Ok(card)
    }

    /// Drops a card at `to_index` of a list.
    ///
    /// Source and target lists are renumbered densely in one store call;
    /// `card.moved` is emitted only when the list changes.
    pub async fn move_card(
        &self,
        actor: &ActorIdentity,
        card_id: CardId,
        to_list_id: ListId,
        to_index: usize,
    ) -> AppResult<Card> {
        let card = self.require_card(card_id).await?;
        require_member(self.boards.as_ref(), actor, card.board_id).await?;
        let target = self.require_list(to_list_id).await?;
        if target.board_id != card.board_id {
            return Err(AppError::Validation(format!(
                "list '{to_list_id}' does not belong to board '{}'",
                card.board_id
            )));
        }

        let placements = if target.id == card.list_id {
            let cards = self.boards.list_cards(card.list_id).await?;
            let from = cards
                .iter()
                .position(|candidate| candidate.id == card.id)
                .ok_or_else(|| AppError::NotFound(format!("card '{card_id}' not found")))?;

            dense_placements(reorder_within(cards, from, to_index)?, card.list_id)
        } else {
            let source: Vec<Card> = self
                .boards
                .list_cards(card.list_id)
                .await?
                .into_iter()
                .filter(|candidate| candidate.id != card.id)
                .collect();
            let mut destination = self.boards.list_cards(target.id).await?;
            destination.insert(to_index.min(destination.len()), card.clone());

            let mut placements = dense_placements(source, card.list_id);
            placements.extend(dense_placements(destination, target.id));
            placements
        };

        self.boards.reposition_cards(placements).await?;

        if target.id != card.list_id {
            self.emit(DomainEvent::CardMoved {
                board_id: card.board_id,
                actor_user_id: actor.user_id().clone(),
                card_id: card.id,
                from_list_id: card.list_id,
                to_list_id: target.id,
            })
            .await?;
        }

        self.require_card(card.id).await
    }

    /// Sets the completion flag; emits `card.status` only when the value changes.
    pub async fn set_card_completion(
        &self,
        actor: &ActorIdentity,
        card_id: CardId,
        is_completed: bool,
    ) -> AppResult<Card> {
        let card = self.require_card(card_id).await?;
        require_member(self.boards.as_ref(), actor, card.board_id).await?;
        if card.is_completed == is_completed {
            return Ok(card);
        }

        let card = self
            .boards
            .set_card_completion(card.id, is_completed)
            .await?;

        self.emit(DomainEvent::CardStatusChanged {
            board_id: card.board_id,
            actor_user_id: actor.user_id().clone(),
            card_id: card.id,
            is_completed,
        })
        .await?;

        Ok(card)
    }
}

fn dense_placements(cards: Vec<Card>, list_id: ListId) -> Vec<CardPlacement> {
    let positions = dense_positions(cards.len());
    cards
        .into_iter()
        .zip(positions)
        .map(|(card, position)| CardPlacement {
            card_id: card.id,
            list_id,
            position,
        })
        .collect()
}
