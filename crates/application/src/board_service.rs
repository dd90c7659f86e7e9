use std::sync::Arc;

use chrono::Utc;
use lanewright_core::{ActorIdentity, AppError, AppResult, BoardId, CardId, ListId, NonEmptyString};
use lanewright_domain::{
    BoardList, Card, DomainEvent, EventEnvelope, dense_positions, reorder_within,
};

use crate::automation_ports::{
    BoardRepository, CardPlacement, EventTransport, ListPosition, NewCard, NewList,
};
use crate::board_access::require_member;

mod cards;
mod lists;

#[cfg(test)]
mod tests;

/// Board operations that mutate lists and cards and emit the matching domain events.
#[derive(Clone)]
pub struct BoardService {
    boards: Arc<dyn BoardRepository>,
    transport: Arc<dyn EventTransport>,
}

impl BoardService {
    /// Creates a board service.
    #[must_use]
    pub fn new(boards: Arc<dyn BoardRepository>, transport: Arc<dyn EventTransport>) -> Self {
        Self { boards, transport }
    }

    async fn emit(&self, event: DomainEvent) -> AppResult<()> {
        let envelope = EventEnvelope::new(event, Utc::now());
        tracing::debug!(
            event_id = envelope.id.as_str(),
            event_type = envelope.event.event_type(),
            "emitting board event"
        );

        self.transport.emit(envelope).await
    }

    async fn require_list(&self, list_id: ListId) -> AppResult<BoardList> {
        self.boards
            .find_list(list_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("list '{list_id}' not found")))
    }

    async fn require_card(&self, card_id: CardId) -> AppResult<Card> {
        self.boards
            .find_card(card_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("card '{card_id}' not found")))
    }
}

/// Position after the last item, or zero for an empty collection.
fn next_dense_position(last: Option<i64>) -> i64 {
    last.map_or(0, |position| position.saturating_add(1))
}
