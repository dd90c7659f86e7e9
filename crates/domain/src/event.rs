use chrono::{DateTime, Utc};
use lanewright_core::{BoardId, CardId, ListId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::automation::{
    AutomationCategory, CompletionStatus, DailyInterval, TriggerPayload, WeekDay,
};

/// Board event consumed by the automation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    /// A card was created.
    #[serde(rename = "card.created", rename_all = "camelCase")]
    CardCreated {
        /// Board id.
        board_id: BoardId,
        /// User who created the card.
        actor_user_id: UserId,
        /// Created card.
        card_id: CardId,
        /// List the card was created in.
        list_id: ListId,
    },
    /// A card moved to another list.
    #[serde(rename = "card.moved", rename_all = "camelCase")]
    CardMoved {
        /// Board id.
        board_id: BoardId,
        /// User who moved the card.
        actor_user_id: UserId,
        /// Moved card.
        card_id: CardId,
        /// Source list.
        from_list_id: ListId,
        /// Destination list.
        to_list_id: ListId,
    },
    /// A card completion flag changed.
    #[serde(rename = "card.status", rename_all = "camelCase")]
    CardStatusChanged {
        /// Board id.
        board_id: BoardId,
        /// User who changed the flag.
        actor_user_id: UserId,
        /// Changed card.
        card_id: CardId,
        /// Resulting completion flag.
        is_completed: bool,
    },
    /// A list was created.
    #[serde(rename = "list.created", rename_all = "camelCase")]
    ListCreated {
        /// Board id.
        board_id: BoardId,
        /// User who created the list.
        actor_user_id: UserId,
        /// Created list.
        list_id: ListId,
    },
    /// Daily schedule fired for a board.
    #[serde(rename = "scheduled.daily", rename_all = "camelCase")]
    ScheduledDaily {
        /// Board id.
        board_id: BoardId,
        /// Day or weekday pass.
        interval: DailyInterval,
    },
    /// Weekly schedule fired for a board.
    #[serde(rename = "scheduled.weekly", rename_all = "camelCase")]
    ScheduledWeekly {
        /// Board id.
        board_id: BoardId,
        /// Today's day token.
        day: WeekDay,
    },
    /// Every-N-weeks schedule fired for a board.
    #[serde(rename = "scheduled.x-weeks", rename_all = "camelCase")]
    ScheduledXWeeks {
        /// Board id.
        board_id: BoardId,
        /// Today's day token.
        day: WeekDay,
        /// Week counter since the Unix epoch.
        week_number: i64,
    },
}

impl DomainEvent {
    /// Returns the wire event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CardCreated { .. } => "card.created",
            Self::CardMoved { .. } => "card.moved",
            Self::CardStatusChanged { .. } => "card.status",
            Self::ListCreated { .. } => "list.created",
            Self::ScheduledDaily { .. } => "scheduled.daily",
            Self::ScheduledWeekly { .. } => "scheduled.weekly",
            Self::ScheduledXWeeks { .. } => "scheduled.x-weeks",
        }
    }

    /// Returns the board the event belongs to.
    #[must_use]
    pub fn board_id(&self) -> BoardId {
        match self {
            Self::CardCreated { board_id, .. }
            | Self::CardMoved { board_id, .. }
            | Self::CardStatusChanged { board_id, .. }
            | Self::ListCreated { board_id, .. }
            | Self::ScheduledDaily { board_id, .. }
            | Self::ScheduledWeekly { board_id, .. }
            | Self::ScheduledXWeeks { board_id, .. } => *board_id,
        }
    }

    /// Returns the human actor, absent for scheduled events.
    #[must_use]
    pub fn actor(&self) -> Option<&UserId> {
        match self {
            Self::CardCreated { actor_user_id, .. }
            | Self::CardMoved { actor_user_id, .. }
            | Self::CardStatusChanged { actor_user_id, .. }
            | Self::ListCreated { actor_user_id, .. } => Some(actor_user_id),
            Self::ScheduledDaily { .. }
            | Self::ScheduledWeekly { .. }
            | Self::ScheduledXWeeks { .. } => None,
        }
    }

    /// Returns the rule category this event is matched against.
    #[must_use]
    pub fn category(&self) -> AutomationCategory {
        if self.actor().is_some() {
            AutomationCategory::Rule
        } else {
            AutomationCategory::Scheduled
        }
    }

    /// Returns the card in event context.
    #[must_use]
    pub fn card_id(&self) -> Option<CardId> {
        match self {
            Self::CardCreated { card_id, .. }
            | Self::CardMoved { card_id, .. }
            | Self::CardStatusChanged { card_id, .. } => Some(*card_id),
            _ => None,
        }
    }

    /// Returns the list in event context: the card's list or the created list.
    #[must_use]
    pub fn list_id(&self) -> Option<ListId> {
        match self {
            Self::CardCreated { list_id, .. } | Self::ListCreated { list_id, .. } => Some(*list_id),
            Self::CardMoved { to_list_id, .. } => Some(*to_list_id),
            _ => None,
        }
    }
}

impl TriggerPayload {
    /// Returns whether the trigger shape and its field predicates accept the event.
    ///
    /// The actor relation is checked separately since it needs the rule creator.
    #[must_use]
    pub fn accepts(&self, event: &DomainEvent) -> bool {
        match (self, event) {
            (Self::WhenCardCreated { .. }, DomainEvent::CardCreated { .. }) => true,
            (
                Self::WhenCardAddedToList { list_id, .. },
                DomainEvent::CardCreated {
                    list_id: event_list_id,
                    ..
                }
                | DomainEvent::CardMoved {
                    to_list_id: event_list_id,
                    ..
                },
            ) => list_id == event_list_id,
            (
                Self::WhenCardMarkedComplete { status, .. },
                DomainEvent::CardStatusChanged { is_completed, .. },
            ) => *status == CompletionStatus::from_completed(*is_completed),
            (Self::WhenListCreated { .. }, DomainEvent::ListCreated { .. }) => true,
            (
                Self::WhenScheduledDaily { interval },
                DomainEvent::ScheduledDaily {
                    interval: event_interval,
                    ..
                },
            ) => interval == event_interval,
            (
                Self::WhenScheduledWeekly { day },
                DomainEvent::ScheduledWeekly { day: event_day, .. },
            ) => day == event_day,
            (
                Self::WhenScheduledXWeeks {
                    weeks,
                    day,
                    anchor_week,
                },
                DomainEvent::ScheduledXWeeks {
                    day: event_day,
                    week_number,
                    ..
                },
            ) => day == event_day && Self::is_due_on_week(*weeks, *anchor_week, *week_number),
            _ => false,
        }
    }
}

/// One delivery of a domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// Delivery idempotency key; step checkpoints are recorded under it.
    pub id: String,
    /// Wrapped event.
    pub event: DomainEvent,
    /// When the event happened.
    pub occurred_at: DateTime<Utc>,
}

impl EventEnvelope {
    /// Wraps an event under a fresh random id.
    #[must_use]
    pub fn new(event: DomainEvent, occurred_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), event, occurred_at)
    }

    /// Wraps an event under a caller-chosen deterministic id.
    #[must_use]
    pub fn with_id(id: impl Into<String>, event: DomainEvent, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            event,
            occurred_at,
        }
    }
}
