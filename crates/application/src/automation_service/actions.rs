use lanewright_domain::{
    BoardCardPosition, BoardList, Card, CardTransfer, CompletionStatus, GapDirection, ListEdge,
    ListPlacement, MemberStrategy, assign_gap_position,
};

use super::execution::EventContext;
use super::*;
use crate::automation_ports::{CardPlacement, ListPosition, NewCard};

/// Non-success result of one action handler.
enum ActionFailure {
    /// The action does not apply to current board state.
    Skipped(String),
    /// The store rejected the action.
    Failed(AppError),
}

impl From<AppError> for ActionFailure {
    fn from(value: AppError) -> Self {
        Self::Failed(value)
    }
}

struct ActionSuccess {
    target: String,
    details: Option<String>,
}

impl ActionSuccess {
    fn new(target: impl ToString) -> Self {
        Self {
            target: target.to_string(),
            details: None,
        }
    }

    fn noted(target: impl ToString, details: impl Into<String>) -> Self {
        Self {
            target: target.to_string(),
            details: Some(details.into()),
        }
    }
}

type ActionResult = Result<ActionSuccess, ActionFailure>;

fn skipped(reason: impl Into<String>) -> ActionFailure {
    ActionFailure::Skipped(reason.into())
}

impl AutomationService {
    pub(super) async fn execute_action(
        &self,
        rule: &Rule,
        index: usize,
        action: &ActionPayload,
        context: &EventContext,
    ) -> AppResult<ActionOutcome> {
        let result = match action {
            ActionPayload::MoveCopyCardToList {
                action,
                position,
                list_id,
            } => {
                self.move_copy_card_to_list(rule, index, *action, *position, *list_id, context)
                    .await
            }
            ActionPayload::MoveCardInBoard { position } => {
                self.move_card_in_board(*position, context).await
            }
            ActionPayload::MarkCardStatus { status } => {
                self.mark_card_status(*status, context).await
            }
            ActionPayload::AddMember { strategy } => {
                self.add_member(rule, *strategy, context).await
            }
            ActionPayload::MoveList { position } => match context.list_id {
                Some(list_id) => self.move_list_to(list_id, *position, context).await,
                None => Err(skipped("event has no list")),
            },
            ActionPayload::CreateCard { title, list_id } => {
                self.create_card(rule, index, title, *list_id, context).await
            }
            ActionPayload::MoveSelectedList { list_id, position } => {
                self.move_list_to(*list_id, *position, context).await
            }
        };

        let key = action.handler_key();
        Ok(match result {
            Ok(ActionSuccess {
                target,
                details: Some(details),
            }) => ActionOutcome::success(key, target).with_details(details),
            Ok(ActionSuccess {
                target,
                details: None,
            }) => ActionOutcome::success(key, target),
            Err(ActionFailure::Skipped(reason)) => ActionOutcome::skipped(key, reason),
            Err(ActionFailure::Failed(error)) => ActionOutcome::failed(key, error.to_string()),
        })
    }

    async fn move_copy_card_to_list(
        &self,
        rule: &Rule,
        index: usize,
        transfer: CardTransfer,
        edge: ListEdge,
        list_id: ListId,
        context: &EventContext,
    ) -> ActionResult {
        let card = self.context_card(context).await?;
        let target = self.board_list(list_id, context).await?;

        match transfer {
            CardTransfer::Move => self.place_at_edge(&card, target.id, edge).await,
            CardTransfer::Copy => {
                let cards = self.boards.list_cards(target.id).await?;
                let position = edge_position(&cards, edge);
                let copy = self
                    .boards
                    .create_card(NewCard {
                        board_id: context.board.id,
                        list_id: target.id,
                        title: card.title.clone(),
                        description: card.description.clone(),
                        position,
                        is_completed: card.is_completed,
                        assignee_ids: card.assignee_ids.clone(),
                        idempotency_key: Some(idempotency_key(rule.id(), context, index)),
                    })
                    .await?;

                Ok(ActionSuccess::new(copy.id))
            }
        }
    }

    async fn move_card_in_board(
        &self,
        position: BoardCardPosition,
        context: &EventContext,
    ) -> ActionResult {
        let card = self.context_card(context).await?;

        match position {
            BoardCardPosition::Top => self.place_at_edge(&card, card.list_id, ListEdge::Top).await,
            BoardCardPosition::Bottom => {
                self.place_at_edge(&card, card.list_id, ListEdge::Bottom)
                    .await
            }
            BoardCardPosition::NextList | BoardCardPosition::PreviousList => {
                let lists = self.boards.list_lists(context.board.id).await?;
                let current = lists
                    .iter()
                    .position(|list| list.id == card.list_id)
                    .ok_or_else(|| skipped("card list not found"))?;

                let adjacent = if position == BoardCardPosition::NextList {
                    lists.get(current + 1)
                } else {
                    current.checked_sub(1).and_then(|index| lists.get(index))
                };

                let Some(adjacent) = adjacent else {
                    return Err(skipped(if position == BoardCardPosition::NextList {
                        "card is already in the last list"
                    } else {
                        "card is already in the first list"
                    }));
                };

                self.place_at_edge(&card, adjacent.id, ListEdge::Top).await
            }
        }
    }

    async fn mark_card_status(
        &self,
        status: CompletionStatus,
        context: &EventContext,
    ) -> ActionResult {
        let card = self.context_card(context).await?;
        if card.is_completed == status.is_completed() {
            return Ok(ActionSuccess::noted(card.id, "card already has this status"));
        }

        let card = self
            .boards
            .set_card_completion(card.id, status.is_completed())
            .await?;
        Ok(ActionSuccess::new(card.id))
    }

    async fn add_member(
        &self,
        rule: &Rule,
        strategy: MemberStrategy,
        context: &EventContext,
    ) -> ActionResult {
        let card = self.context_card(context).await?;
        let members = self.boards.list_members(context.board.id).await?;
        if members.is_empty() {
            return Err(skipped("board has no members"));
        }

        let draw = match strategy {
            MemberStrategy::Random => random_draw()?,
            MemberStrategy::RoundRobin => self.rules.advance_round_robin_cursor(rule.id()).await?,
        };
        let member_count = u64::try_from(members.len())
            .map_err(|_| AppError::Internal("board member count overflow".to_owned()))?;
        let member = usize::try_from(draw % member_count)
            .ok()
            .and_then(|index| members.get(index))
            .ok_or_else(|| AppError::Internal("member selection out of range".to_owned()))?;

        let added = self
            .boards
            .add_card_assignee(card.id, &member.user_id)
            .await?;
        if added {
            Ok(ActionSuccess::noted(
                card.id,
                format!("assigned {}", member.user_id),
            ))
        } else {
            Ok(ActionSuccess::noted(
                card.id,
                format!("{} already assigned", member.user_id),
            ))
        }
    }

    async fn create_card(
        &self,
        rule: &Rule,
        index: usize,
        title: &str,
        list_id: ListId,
        context: &EventContext,
    ) -> ActionResult {
        let target = self.board_list(list_id, context).await?;
        let cards = self.boards.list_cards(target.id).await?;

        let card = self
            .boards
            .create_card(NewCard {
                board_id: context.board.id,
                list_id: target.id,
                title: title.to_owned(),
                description: None,
                position: edge_position(&cards, ListEdge::Bottom),
                is_completed: false,
                assignee_ids: Vec::new(),
                idempotency_key: Some(idempotency_key(rule.id(), context, index)),
            })
            .await?;

        Ok(ActionSuccess::new(card.id))
    }

    async fn move_list_to(
        &self,
        list_id: ListId,
        placement: ListPlacement,
        context: &EventContext,
    ) -> ActionResult {
        let list = self.board_list(list_id, context).await?;
        let others: Vec<BoardList> = self
            .boards
            .list_lists(context.board.id)
            .await?
            .into_iter()
            .filter(|other| other.id != list.id)
            .collect();

        let (already_placed, position) = match placement {
            ListPlacement::First => (
                others.first().is_none_or(|first| first.position > list.position),
                assign_gap_position(
                    GapDirection::Start,
                    others.first().map(|first| first.position),
                ),
            ),
            ListPlacement::Last => (
                others.last().is_none_or(|last| last.position < list.position),
                assign_gap_position(GapDirection::End, others.last().map(|last| last.position)),
            ),
        };

        if already_placed {
            return Ok(ActionSuccess::noted(list.id, "list already in place"));
        }

        let list = self
            .boards
            .set_list_position(ListPosition {
                list_id: list.id,
                position,
            })
            .await?;
        Ok(ActionSuccess::new(list.id))
    }

    async fn place_at_edge(&self, card: &Card, list_id: ListId, edge: ListEdge) -> ActionResult {
        let others: Vec<Card> = self
            .boards
            .list_cards(list_id)
            .await?
            .into_iter()
            .filter(|other| other.id != card.id)
            .collect();

        let already_placed = card.list_id == list_id
            && match edge {
                ListEdge::Top => others.first().is_none_or(|first| first.position > card.position),
                ListEdge::Bottom => others.last().is_none_or(|last| last.position < card.position),
            };
        if already_placed {
            return Ok(ActionSuccess::noted(card.id, "card already in place"));
        }

        let card = self
            .boards
            .place_card(CardPlacement {
                card_id: card.id,
                list_id,
                position: edge_position(&others, edge),
            })
            .await?;
        Ok(ActionSuccess::new(card.id))
    }

    async fn context_card(&self, context: &EventContext) -> Result<Card, ActionFailure> {
        let card_id = context
            .card_id
            .ok_or_else(|| skipped("event has no card"))?;

        self.boards
            .find_card(card_id)
            .await?
            .filter(|card| card.board_id == context.board.id)
            .ok_or_else(|| skipped("card not found"))
    }

    async fn board_list(
        &self,
        list_id: ListId,
        context: &EventContext,
    ) -> Result<BoardList, ActionFailure> {
        self.boards
            .find_list(list_id)
            .await?
            .filter(|list| list.board_id == context.board.id)
            .ok_or_else(|| skipped(format!("list '{list_id}' not found")))
    }
}

/// Gap position beyond the first or last card of an ordered slice.
fn edge_position(cards: &[Card], edge: ListEdge) -> i64 {
    match edge {
        ListEdge::Top => {
            assign_gap_position(GapDirection::Start, cards.first().map(|card| card.position))
        }
        ListEdge::Bottom => {
            assign_gap_position(GapDirection::End, cards.last().map(|card| card.position))
        }
    }
}

/// Stable key for cards created by one action of one rule for one delivery.
fn idempotency_key(rule_id: RuleId, context: &EventContext, index: usize) -> String {
    use sha2::{Digest, Sha256};
    use std::fmt::Write;

    let mut hasher = Sha256::new();
    hasher.update(format!("{rule_id}:{}:{index}", context.envelope.id).as_bytes());
    let result = hasher.finalize();

    result
        .iter()
        .fold(String::with_capacity(64), |mut acc, byte| {
            let _ = write!(acc, "{byte:02x}");
            acc
        })
}

fn random_draw() -> AppResult<u64> {
    let mut bytes = [0u8; 8];
    getrandom::fill(&mut bytes)
        .map_err(|error| AppError::Internal(format!("failed to draw random member: {error}")))?;

    Ok(u64::from_le_bytes(bytes))
}
