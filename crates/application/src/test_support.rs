use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use lanewright_core::{
    ActorIdentity, AppError, AppResult, BoardId, CardId, ListId, RuleId, UserId,
};
use lanewright_domain::{
    AutomationCategory, Board, BoardList, BoardMember, BoardRole, Card, EventEnvelope, Rule,
    RuleDetails, RuleInput, TriggerHandlerKey,
};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::automation_ports::{
    BoardRepository, CardPlacement, EventTransport, ListPosition, NewCard, NewList,
    RealtimePublisher, RuleRepository, ScheduledRuleIndex, StepJournal,
};

pub(crate) fn user(value: &str) -> UserId {
    UserId::new(value).unwrap_or_else(|_| unreachable!())
}

pub(crate) fn actor(value: &str) -> ActorIdentity {
    ActorIdentity::new(user(value), value.to_uppercase())
}

pub(crate) fn instant(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0)
        .single()
        .unwrap_or_else(|| unreachable!())
}

pub(crate) fn rule(
    board_id: BoardId,
    creator: &str,
    details: RuleDetails,
    created_at: DateTime<Utc>,
) -> Rule {
    Rule::new(RuleInput {
        id: RuleId::new(),
        board_id,
        creator_id: user(creator),
        details,
        is_enabled: true,
        is_deleted: false,
        created_at,
        updated_at: created_at,
    })
}

#[derive(Default)]
struct BoardState {
    boards: HashMap<BoardId, Board>,
    members: HashMap<BoardId, Vec<BoardMember>>,
    lists: HashMap<ListId, BoardList>,
    cards: HashMap<CardId, Card>,
    idempotency_keys: HashMap<String, CardId>,
}

#[derive(Default)]
pub(crate) struct FakeBoardRepository {
    state: Mutex<BoardState>,
}

impl FakeBoardRepository {
    pub(crate) async fn add_board(&self, slug: &str, owner: &str) -> Board {
        let board = Board {
            id: BoardId::new(),
            slug: slug.to_owned(),
            title: slug.to_owned(),
            owner_id: user(owner),
        };

        let mut state = self.state.lock().await;
        state.boards.insert(board.id, board.clone());
        state.members.insert(board.id, Vec::new());
        drop(state);

        self.add_member(board.id, owner, BoardRole::Owner).await;
        board
    }

    pub(crate) async fn add_member(&self, board_id: BoardId, user_id: &str, role: BoardRole) {
        let mut state = self.state.lock().await;
        let members = state.members.entry(board_id).or_default();
        let joined_at = instant(1) + Duration::minutes(i64::try_from(members.len()).unwrap_or(0));
        members.push(BoardMember {
            user_id: user(user_id),
            display_name: user_id.to_uppercase(),
            role,
            joined_at,
        });
    }

    pub(crate) async fn add_list(
        &self,
        board_id: BoardId,
        title: &str,
        position: i64,
    ) -> BoardList {
        let list = BoardList {
            id: ListId::new(),
            board_id,
            title: title.to_owned(),
            position,
        };
        self.state.lock().await.lists.insert(list.id, list.clone());
        list
    }

    pub(crate) async fn add_card(&self, list: &BoardList, title: &str, position: i64) -> Card {
        let card = Card {
            id: CardId::new(),
            board_id: list.board_id,
            list_id: list.id,
            title: title.to_owned(),
            description: None,
            position,
            is_completed: false,
            assignee_ids: Vec::new(),
        };
        self.state.lock().await.cards.insert(card.id, card.clone());
        card
    }

    pub(crate) async fn remove_list(&self, list_id: ListId) {
        self.state.lock().await.lists.remove(&list_id);
    }

    pub(crate) async fn remove_card(&self, card_id: CardId) {
        self.state.lock().await.cards.remove(&card_id);
    }

    pub(crate) async fn card(&self, card_id: CardId) -> Option<Card> {
        self.state.lock().await.cards.get(&card_id).cloned()
    }

    pub(crate) async fn list(&self, list_id: ListId) -> Option<BoardList> {
        self.state.lock().await.lists.get(&list_id).cloned()
    }

    pub(crate) async fn cards_in(&self, list_id: ListId) -> Vec<Card> {
        self.list_cards(list_id).await.unwrap_or_default()
    }
}

#[async_trait]
impl BoardRepository for FakeBoardRepository {
    async fn find_board(&self, board_id: BoardId) -> AppResult<Option<Board>> {
        Ok(self.state.lock().await.boards.get(&board_id).cloned())
    }

    async fn find_member(
        &self,
        board_id: BoardId,
        user_id: &UserId,
    ) -> AppResult<Option<BoardMember>> {
        Ok(self
            .state
            .lock()
            .await
            .members
            .get(&board_id)
            .and_then(|members| members.iter().find(|member| member.user_id == *user_id))
            .cloned())
    }

    async fn list_members(&self, board_id: BoardId) -> AppResult<Vec<BoardMember>> {
        Ok(self
            .state
            .lock()
            .await
            .members
            .get(&board_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_list(&self, list_id: ListId) -> AppResult<Option<BoardList>> {
        Ok(self.state.lock().await.lists.get(&list_id).cloned())
    }

    async fn list_lists(&self, board_id: BoardId) -> AppResult<Vec<BoardList>> {
        let mut lists: Vec<BoardList> = self
            .state
            .lock()
            .await
            .lists
            .values()
            .filter(|list| list.board_id == board_id)
            .cloned()
            .collect();
        lists.sort_by_key(|list| list.position);
        Ok(lists)
    }

    async fn find_card(&self, card_id: CardId) -> AppResult<Option<Card>> {
        Ok(self.state.lock().await.cards.get(&card_id).cloned())
    }

    async fn list_cards(&self, list_id: ListId) -> AppResult<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .state
            .lock()
            .await
            .cards
            .values()
            .filter(|card| card.list_id == list_id)
            .cloned()
            .collect();
        cards.sort_by_key(|card| card.position);
        Ok(cards)
    }

    async fn create_list(&self, list: NewList) -> AppResult<BoardList> {
        let list = BoardList {
            id: ListId::new(),
            board_id: list.board_id,
            title: list.title,
            position: list.position,
        };
        self.state.lock().await.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn create_card(&self, card: NewCard) -> AppResult<Card> {
        let mut state = self.state.lock().await;
        if let Some(key) = card.idempotency_key.as_ref()
            && let Some(existing) = state
                .idempotency_keys
                .get(key)
                .and_then(|card_id| state.cards.get(card_id))
        {
            return Ok(existing.clone());
        }

        let created = Card {
            id: CardId::new(),
            board_id: card.board_id,
            list_id: card.list_id,
            title: card.title,
            description: card.description,
            position: card.position,
            is_completed: card.is_completed,
            assignee_ids: card.assignee_ids,
        };

        if let Some(key) = card.idempotency_key {
            state.idempotency_keys.insert(key, created.id);
        }
        state.cards.insert(created.id, created.clone());
        Ok(created)
    }

    async fn place_card(&self, placement: CardPlacement) -> AppResult<Card> {
        let mut state = self.state.lock().await;
        let card = state
            .cards
            .get_mut(&placement.card_id)
            .ok_or_else(|| AppError::NotFound(format!("card '{}' not found", placement.card_id)))?;
        card.list_id = placement.list_id;
        card.position = placement.position;
        Ok(card.clone())
    }

    async fn reposition_cards(&self, placements: Vec<CardPlacement>) -> AppResult<()> {
        for placement in placements {
            self.place_card(placement).await?;
        }
        Ok(())
    }

    async fn set_list_position(&self, position: ListPosition) -> AppResult<BoardList> {
        let mut state = self.state.lock().await;
        let list = state
            .lists
            .get_mut(&position.list_id)
            .ok_or_else(|| AppError::NotFound(format!("list '{}' not found", position.list_id)))?;
        list.position = position.position;
        Ok(list.clone())
    }

    async fn reposition_lists(&self, positions: Vec<ListPosition>) -> AppResult<()> {
        for position in positions {
            self.set_list_position(position).await?;
        }
        Ok(())
    }

    async fn set_card_completion(&self, card_id: CardId, is_completed: bool) -> AppResult<Card> {
        let mut state = self.state.lock().await;
        let card = state
            .cards
            .get_mut(&card_id)
            .ok_or_else(|| AppError::NotFound(format!("card '{card_id}' not found")))?;
        card.is_completed = is_completed;
        Ok(card.clone())
    }

    async fn add_card_assignee(&self, card_id: CardId, user_id: &UserId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let card = state
            .cards
            .get_mut(&card_id)
            .ok_or_else(|| AppError::NotFound(format!("card '{card_id}' not found")))?;
        if card.assignee_ids.contains(user_id) {
            return Ok(false);
        }
        card.assignee_ids.push(user_id.clone());
        Ok(true)
    }
}

#[derive(Default)]
pub(crate) struct FakeRuleRepository {
    rules: Mutex<Vec<Rule>>,
    cursors: Mutex<HashMap<RuleId, u64>>,
}

impl FakeRuleRepository {
    pub(crate) async fn insert(&self, rule: Rule) {
        self.rules.lock().await.push(rule);
    }

    pub(crate) async fn all(&self) -> Vec<Rule> {
        self.rules.lock().await.clone()
    }
}

#[async_trait]
impl RuleRepository for FakeRuleRepository {
    async fn create_rule(&self, rule: Rule) -> AppResult<()> {
        self.rules.lock().await.push(rule);
        Ok(())
    }

    async fn find_rule(&self, rule_id: RuleId) -> AppResult<Option<Rule>> {
        Ok(self
            .rules
            .lock()
            .await
            .iter()
            .find(|rule| rule.id() == rule_id)
            .cloned())
    }

    async fn list_active_rules(
        &self,
        board_id: BoardId,
        category: AutomationCategory,
    ) -> AppResult<Vec<Rule>> {
        let mut rules: Vec<Rule> = self
            .rules
            .lock()
            .await
            .iter()
            .filter(|rule| {
                rule.board_id() == board_id && rule.category() == category && rule.is_active()
            })
            .cloned()
            .collect();
        rules.sort_by_key(Rule::created_at);
        Ok(rules)
    }

    async fn set_rule_enabled(
        &self,
        rule_id: RuleId,
        is_enabled: bool,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Rule> {
        let mut rules = self.rules.lock().await;
        let index = rules
            .iter()
            .position(|rule| rule.id() == rule_id)
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' not found")))?;
        let current = &rules[index];
        let updated = Rule::new(RuleInput {
            id: current.id(),
            board_id: current.board_id(),
            creator_id: current.creator_id().clone(),
            details: current.details().clone(),
            is_enabled,
            is_deleted: current.is_deleted(),
            created_at: current.created_at(),
            updated_at,
        });
        rules[index] = updated.clone();
        Ok(updated)
    }

    async fn soft_delete_rule(&self, rule_id: RuleId, updated_at: DateTime<Utc>) -> AppResult<()> {
        let mut rules = self.rules.lock().await;
        let index = rules
            .iter()
            .position(|rule| rule.id() == rule_id)
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' not found")))?;
        let current = &rules[index];
        rules[index] = Rule::new(RuleInput {
            id: current.id(),
            board_id: current.board_id(),
            creator_id: current.creator_id().clone(),
            details: current.details().clone(),
            is_enabled: current.is_enabled(),
            is_deleted: true,
            created_at: current.created_at(),
            updated_at,
        });
        Ok(())
    }

    async fn scheduled_rule_index(&self) -> AppResult<ScheduledRuleIndex> {
        let mut index = ScheduledRuleIndex::default();
        for rule in self.rules.lock().await.iter().filter(|rule| rule.is_active()) {
            let partition = match rule.handler_key() {
                TriggerHandlerKey::WhenScheduledDaily => &mut index.daily,
                TriggerHandlerKey::WhenScheduledWeekly => &mut index.weekly,
                TriggerHandlerKey::WhenScheduledXWeeks => &mut index.x_weeks,
                _ => continue,
            };
            if !partition.contains(&rule.board_id()) {
                partition.push(rule.board_id());
            }
        }
        Ok(index)
    }

    async fn advance_round_robin_cursor(&self, rule_id: RuleId) -> AppResult<u64> {
        let mut cursors = self.cursors.lock().await;
        let cursor = cursors.entry(rule_id).or_insert(0);
        let current = *cursor;
        *cursor += 1;
        Ok(current)
    }
}

#[derive(Default)]
pub(crate) struct FakeStepJournal {
    steps: Mutex<HashMap<(String, String), Value>>,
}

impl FakeStepJournal {
    pub(crate) async fn step_count(&self) -> usize {
        self.steps.lock().await.len()
    }
}

#[async_trait]
impl StepJournal for FakeStepJournal {
    async fn completed_step(&self, task_key: &str, step_key: &str) -> AppResult<Option<Value>> {
        Ok(self
            .steps
            .lock()
            .await
            .get(&(task_key.to_owned(), step_key.to_owned()))
            .cloned())
    }

    async fn record_step(&self, task_key: &str, step_key: &str, output: Value) -> AppResult<()> {
        self.steps
            .lock()
            .await
            .entry((task_key.to_owned(), step_key.to_owned()))
            .or_insert(output);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PublishedMessage {
    pub(crate) channel: String,
    pub(crate) event: String,
    pub(crate) payload: Value,
}

#[derive(Default)]
pub(crate) struct FakeRealtimePublisher {
    messages: Mutex<Vec<PublishedMessage>>,
    failures_remaining: Mutex<u32>,
}

impl FakeRealtimePublisher {
    pub(crate) async fn fail_next(&self, count: u32) {
        *self.failures_remaining.lock().await = count;
    }

    pub(crate) async fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl RealtimePublisher for FakeRealtimePublisher {
    async fn publish(&self, channel: &str, event: &str, payload: Value) -> AppResult<()> {
        let mut failures_remaining = self.failures_remaining.lock().await;
        if *failures_remaining > 0 {
            *failures_remaining -= 1;
            return Err(AppError::Internal("realtime transport unavailable".to_owned()));
        }

        self.messages.lock().await.push(PublishedMessage {
            channel: channel.to_owned(),
            event: event.to_owned(),
            payload,
        });
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeEventTransport {
    batches: Mutex<Vec<Vec<EventEnvelope>>>,
}

impl FakeEventTransport {
    pub(crate) async fn batches(&self) -> Vec<Vec<EventEnvelope>> {
        self.batches.lock().await.clone()
    }

    pub(crate) async fn envelopes(&self) -> Vec<EventEnvelope> {
        self.batches.lock().await.concat()
    }
}

#[async_trait]
impl EventTransport for FakeEventTransport {
    async fn emit(&self, envelope: EventEnvelope) -> AppResult<()> {
        self.batches.lock().await.push(vec![envelope]);
        Ok(())
    }

    async fn emit_batch(&self, envelopes: Vec<EventEnvelope>) -> AppResult<()> {
        self.batches.lock().await.push(envelopes);
        Ok(())
    }
}
