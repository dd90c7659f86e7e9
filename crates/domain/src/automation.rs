use std::str::FromStr;

use chrono::{DateTime, Utc};
use lanewright_core::{AppError, AppResult, BoardId, ListId, RuleId, UserId};
use serde::{Deserialize, Serialize};

/// Category shared by a rule, its trigger and all of its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomationCategory {
    /// Fires on board events caused by a person.
    Rule,
    /// Fires from the daily schedule fan-out.
    Scheduled,
}

impl AutomationCategory {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Scheduled => "scheduled",
        }
    }
}

impl FromStr for AutomationCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "rule" => Ok(Self::Rule),
            "scheduled" => Ok(Self::Scheduled),
            _ => Err(AppError::Validation(format!(
                "unknown automation category '{value}'"
            ))),
        }
    }
}

/// Closed set of trigger behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerHandlerKey {
    /// A card was created anywhere on the board.
    WhenCardCreated,
    /// A card was created in, or moved into, one list.
    WhenCardAddedToList,
    /// A card completion flag changed.
    WhenCardMarkedComplete,
    /// A list was created on the board.
    WhenListCreated,
    /// Every day or every weekday.
    WhenScheduledDaily,
    /// Once a week on one day.
    WhenScheduledWeekly,
    /// Every N weeks on one day.
    WhenScheduledXWeeks,
}

impl TriggerHandlerKey {
    /// Returns all trigger handler keys.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[TriggerHandlerKey] = &[
            TriggerHandlerKey::WhenCardCreated,
            TriggerHandlerKey::WhenCardAddedToList,
            TriggerHandlerKey::WhenCardMarkedComplete,
            TriggerHandlerKey::WhenListCreated,
            TriggerHandlerKey::WhenScheduledDaily,
            TriggerHandlerKey::WhenScheduledWeekly,
            TriggerHandlerKey::WhenScheduledXWeeks,
        ];

        ALL
    }

    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhenCardCreated => "WHEN_CARD_CREATED",
            Self::WhenCardAddedToList => "WHEN_CARD_ADDED_TO_LIST",
            Self::WhenCardMarkedComplete => "WHEN_CARD_MARKED_COMPLETE",
            Self::WhenListCreated => "WHEN_LIST_CREATED",
            Self::WhenScheduledDaily => "WHEN_SCHEDULED_DAILY",
            Self::WhenScheduledWeekly => "WHEN_SCHEDULED_WEEKLY",
            Self::WhenScheduledXWeeks => "WHEN_SCHEDULED_X_WEEKS",
        }
    }

    /// Returns the category this trigger belongs to.
    #[must_use]
    pub fn category(&self) -> AutomationCategory {
        match self {
            Self::WhenCardCreated
            | Self::WhenCardAddedToList
            | Self::WhenCardMarkedComplete
            | Self::WhenListCreated => AutomationCategory::Rule,
            Self::WhenScheduledDaily | Self::WhenScheduledWeekly | Self::WhenScheduledXWeeks => {
                AutomationCategory::Scheduled
            }
        }
    }

    /// Returns whether events for this trigger always carry a card.
    #[must_use]
    pub fn provides_card(&self) -> bool {
        matches!(
            self,
            Self::WhenCardCreated | Self::WhenCardAddedToList | Self::WhenCardMarkedComplete
        )
    }
}

impl FromStr for TriggerHandlerKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown trigger handler key '{value}'")))
    }
}

/// Closed set of action behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionHandlerKey {
    /// Move or copy the event card to a chosen list.
    MoveCopyCardToList,
    /// Move the event card inside its board.
    MoveCardInBoard,
    /// Set the event card completion flag.
    MarkCardStatus,
    /// Assign a board member to the event card.
    AddMember,
    /// Move the list in event context to the first or last position.
    MoveList,
    /// Create a new card in a chosen list.
    CreateCard,
    /// Move a chosen list to the first or last position.
    MoveSelectedList,
}

impl ActionHandlerKey {
    /// Returns all action handler keys.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ActionHandlerKey] = &[
            ActionHandlerKey::MoveCopyCardToList,
            ActionHandlerKey::MoveCardInBoard,
            ActionHandlerKey::MarkCardStatus,
            ActionHandlerKey::AddMember,
            ActionHandlerKey::MoveList,
            ActionHandlerKey::CreateCard,
            ActionHandlerKey::MoveSelectedList,
        ];

        ALL
    }

    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoveCopyCardToList => "MOVE_COPY_CARD_TO_LIST",
            Self::MoveCardInBoard => "MOVE_CARD_IN_BOARD",
            Self::MarkCardStatus => "MARK_CARD_STATUS",
            Self::AddMember => "ADD_MEMBER",
            Self::MoveList => "MOVE_LIST",
            Self::CreateCard => "CREATE_CARD",
            Self::MoveSelectedList => "MOVE_SELECTED_LIST",
        }
    }

    /// Returns the category this action belongs to.
    #[must_use]
    pub fn category(&self) -> AutomationCategory {
        match self {
            Self::MoveCopyCardToList
            | Self::MoveCardInBoard
            | Self::MarkCardStatus
            | Self::AddMember
            | Self::MoveList => AutomationCategory::Rule,
            Self::CreateCard | Self::MoveSelectedList => AutomationCategory::Scheduled,
        }
    }

    /// Returns whether the action operates on the card in event context.
    #[must_use]
    pub fn requires_card(&self) -> bool {
        matches!(
            self,
            Self::MoveCopyCardToList
                | Self::MoveCardInBoard
                | Self::MarkCardStatus
                | Self::AddMember
        )
    }
}

impl FromStr for ActionHandlerKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown action handler key '{value}'")))
    }
}

/// How the event actor must relate to the rule creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRelation {
    /// Only events caused by the rule creator.
    Me,
    /// Events caused by anyone.
    Anyone,
    /// Events caused by anyone but the rule creator.
    AnyoneExceptMe,
}

impl ActorRelation {
    /// Returns whether an event caused by `actor` fires a rule created by `creator`.
    #[must_use]
    pub fn admits(&self, actor: &UserId, creator: &UserId) -> bool {
        match self {
            Self::Me => actor == creator,
            Self::Anyone => true,
            Self::AnyoneExceptMe => actor != creator,
        }
    }
}

/// Target completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// Card is done.
    Complete,
    /// Card is not done.
    Incomplete,
}

impl CompletionStatus {
    /// Returns the card flag value for this status.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Maps a card flag value to a status.
    #[must_use]
    pub fn from_completed(is_completed: bool) -> Self {
        if is_completed {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }
}

/// Daily schedule granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DailyInterval {
    /// Every calendar day.
    Day,
    /// Monday through Friday.
    Weekday,
}

impl DailyInterval {
    /// Returns stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Weekday => "WEEKDAY",
        }
    }
}

/// Day of week token, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    /// Sunday.
    Sun,
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
}

impl WeekDay {
    const ORDER: [WeekDay; 7] = [
        WeekDay::Sun,
        WeekDay::Mon,
        WeekDay::Tue,
        WeekDay::Wed,
        WeekDay::Thu,
        WeekDay::Fri,
        WeekDay::Sat,
    ];

    /// Returns the day for an index where 0 is Sunday.
    #[must_use]
    pub fn from_index(index: u32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|index| Self::ORDER.get(index).copied())
    }

    /// Returns the index where 0 is Sunday.
    #[must_use]
    pub fn index(&self) -> u32 {
        match self {
            Self::Sun => 0,
            Self::Mon => 1,
            Self::Tue => 2,
            Self::Wed => 3,
            Self::Thu => 4,
            Self::Fri => 5,
            Self::Sat => 6,
        }
    }

    /// Returns the three-letter token.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
        }
    }

    /// Returns whether the day is Monday through Friday.
    #[must_use]
    pub fn is_weekday(&self) -> bool {
        !matches!(self, Self::Sun | Self::Sat)
    }
}

/// Whether a card is moved or duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTransfer {
    /// Relocate the card.
    Move,
    /// Create a duplicate in the target list.
    Copy,
}

/// Edge of a list of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListEdge {
    /// First card.
    Top,
    /// Last card.
    Bottom,
}

/// Destination of a card move inside its own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardCardPosition {
    /// Top of the current list.
    Top,
    /// Bottom of the current list.
    Bottom,
    /// Adjacent list to the right.
    NextList,
    /// Adjacent list to the left.
    PreviousList,
}

/// Member selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStrategy {
    /// Uniformly random board member.
    Random,
    /// Board members in join order, one per execution.
    RoundRobin,
}

/// Edge of a board of lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPlacement {
    /// Leftmost list.
    First,
    /// Rightmost list.
    Last,
}

/// Trigger payload keyed by handler key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "handlerKey", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerPayload {
    /// Card created anywhere on the board.
    WhenCardCreated {
        /// Actor relation filter.
        by: ActorRelation,
    },
    /// Card created in or moved into one list.
    #[serde(rename_all = "camelCase")]
    WhenCardAddedToList {
        /// List the card must land in.
        list_id: ListId,
        /// Actor relation filter.
        by: ActorRelation,
    },
    /// Card completion flag changed to `status`.
    WhenCardMarkedComplete {
        /// Resulting completion status.
        status: CompletionStatus,
        /// Actor relation filter.
        by: ActorRelation,
    },
    /// List created on the board.
    WhenListCreated {
        /// Actor relation filter.
        by: ActorRelation,
    },
    /// Daily schedule.
    WhenScheduledDaily {
        /// Every day or every weekday.
        interval: DailyInterval,
    },
    /// Weekly schedule.
    WhenScheduledWeekly {
        /// Day the rule runs on.
        day: WeekDay,
    },
    /// Every N weeks schedule.
    #[serde(rename = "WHEN_SCHEDULED_X_WEEKS", rename_all = "camelCase")]
    WhenScheduledXWeeks {
        /// Interval in weeks.
        weeks: u32,
        /// Day the rule runs on.
        day: WeekDay,
        /// Week counter the cycle starts from; stamped when the rule is created.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anchor_week: Option<i64>,
    },
}

impl TriggerPayload {
    /// Returns the handler key of this payload.
    #[must_use]
    pub fn handler_key(&self) -> TriggerHandlerKey {
        match self {
            Self::WhenCardCreated { .. } => TriggerHandlerKey::WhenCardCreated,
            Self::WhenCardAddedToList { .. } => TriggerHandlerKey::WhenCardAddedToList,
            Self::WhenCardMarkedComplete { .. } => TriggerHandlerKey::WhenCardMarkedComplete,
            Self::WhenListCreated { .. } => TriggerHandlerKey::WhenListCreated,
            Self::WhenScheduledDaily { .. } => TriggerHandlerKey::WhenScheduledDaily,
            Self::WhenScheduledWeekly { .. } => TriggerHandlerKey::WhenScheduledWeekly,
            Self::WhenScheduledXWeeks { .. } => TriggerHandlerKey::WhenScheduledXWeeks,
        }
    }

    /// Returns the category of this payload.
    #[must_use]
    pub fn category(&self) -> AutomationCategory {
        self.handler_key().category()
    }

    /// Returns the actor relation filter for person-driven triggers.
    #[must_use]
    pub fn actor_relation(&self) -> Option<ActorRelation> {
        match self {
            Self::WhenCardCreated { by }
            | Self::WhenCardAddedToList { by, .. }
            | Self::WhenCardMarkedComplete { by, .. }
            | Self::WhenListCreated { by } => Some(*by),
            Self::WhenScheduledDaily { .. }
            | Self::WhenScheduledWeekly { .. }
            | Self::WhenScheduledXWeeks { .. } => None,
        }
    }

    /// Returns whether a due X-weeks trigger fires for `week_number`.
    #[must_use]
    pub fn is_due_on_week(weeks: u32, anchor_week: Option<i64>, week_number: i64) -> bool {
        if weeks == 0 {
            return false;
        }

        (week_number - anchor_week.unwrap_or(0)).rem_euclid(i64::from(weeks)) == 0
    }

    fn validate(&self) -> AppResult<()> {
        if let Self::WhenScheduledXWeeks { weeks, .. } = self
            && *weeks == 0
        {
            return Err(AppError::Validation(
                "WHEN_SCHEDULED_X_WEEKS trigger requires weeks greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}

/// Action payload keyed by handler key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "handlerKey", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionPayload {
    /// Move or copy the event card to another list.
    #[serde(rename_all = "camelCase")]
    MoveCopyCardToList {
        /// Move or copy.
        action: CardTransfer,
        /// Top or bottom of the target list.
        position: ListEdge,
        /// Target list.
        list_id: ListId,
    },
    /// Move the event card within its own board.
    MoveCardInBoard {
        /// Destination.
        position: BoardCardPosition,
    },
    /// Set the event card completion flag.
    MarkCardStatus {
        /// Target status.
        status: CompletionStatus,
    },
    /// Assign a board member to the event card.
    AddMember {
        /// Member selection strategy.
        strategy: MemberStrategy,
    },
    /// Move the list in event context.
    MoveList {
        /// First or last.
        position: ListPlacement,
    },
    /// Create a card.
    #[serde(rename_all = "camelCase")]
    CreateCard {
        /// Card title.
        title: String,
        /// Target list.
        list_id: ListId,
    },
    /// Move a chosen list.
    #[serde(rename_all = "camelCase")]
    MoveSelectedList {
        /// List to move.
        list_id: ListId,
        /// First or last.
        position: ListPlacement,
    },
}

impl ActionPayload {
    /// Returns the handler key of this payload.
    #[must_use]
    pub fn handler_key(&self) -> ActionHandlerKey {
        match self {
            Self::MoveCopyCardToList { .. } => ActionHandlerKey::MoveCopyCardToList,
            Self::MoveCardInBoard { .. } => ActionHandlerKey::MoveCardInBoard,
            Self::MarkCardStatus { .. } => ActionHandlerKey::MarkCardStatus,
            Self::AddMember { .. } => ActionHandlerKey::AddMember,
            Self::MoveList { .. } => ActionHandlerKey::MoveList,
            Self::CreateCard { .. } => ActionHandlerKey::CreateCard,
            Self::MoveSelectedList { .. } => ActionHandlerKey::MoveSelectedList,
        }
    }

    /// Returns the category of this payload.
    #[must_use]
    pub fn category(&self) -> AutomationCategory {
        self.handler_key().category()
    }

    fn validate(&self) -> AppResult<()> {
        if let Self::CreateCard { title, .. } = self
            && title.trim().is_empty()
        {
            return Err(AppError::Validation(
                "CREATE_CARD action requires a non-empty title".to_owned(),
            ));
        }

        Ok(())
    }
}

/// Trigger plus ordered actions; both the stored format and the execution input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRuleDetails", into = "StoredRuleDetails")]
pub struct RuleDetails {
    trigger: TriggerPayload,
    actions: Vec<ActionPayload>,
}

impl RuleDetails {
    /// Creates validated rule details.
    pub fn new(trigger: TriggerPayload, actions: Vec<ActionPayload>) -> AppResult<Self> {
        if actions.is_empty() {
            return Err(AppError::Validation(
                "automation rule must define at least one action".to_owned(),
            ));
        }

        trigger.validate()?;
        let category = trigger.category();
        let trigger_key = trigger.handler_key();

        for (index, action) in actions.iter().enumerate() {
            action.validate()?;

            if action.category() != category {
                return Err(AppError::Validation(format!(
                    "action {index} '{}' is a {} action but trigger '{}' is {}",
                    action.handler_key().as_str(),
                    action.category().as_str(),
                    trigger_key.as_str(),
                    category.as_str()
                )));
            }

            if action.handler_key().requires_card() && !trigger_key.provides_card() {
                return Err(AppError::Validation(format!(
                    "action {index} '{}' needs a card but trigger '{}' does not provide one",
                    action.handler_key().as_str(),
                    trigger_key.as_str()
                )));
            }
        }

        Ok(Self { trigger, actions })
    }

    /// Returns the trigger payload.
    #[must_use]
    pub fn trigger(&self) -> &TriggerPayload {
        &self.trigger
    }

    /// Returns the ordered action payloads.
    #[must_use]
    pub fn actions(&self) -> &[ActionPayload] {
        self.actions.as_slice()
    }

    /// Returns the shared category.
    #[must_use]
    pub fn category(&self) -> AutomationCategory {
        self.trigger.category()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPayload<T> {
    category: AutomationCategory,
    #[serde(flatten)]
    payload: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRuleDetails {
    trigger: StoredPayload<TriggerPayload>,
    actions: Vec<StoredPayload<ActionPayload>>,
}

impl TryFrom<StoredRuleDetails> for RuleDetails {
    type Error = AppError;

    fn try_from(value: StoredRuleDetails) -> Result<Self, Self::Error> {
        if value.trigger.category != value.trigger.payload.category() {
            return Err(AppError::Validation(format!(
                "trigger '{}' cannot be stored with category '{}'",
                value.trigger.payload.handler_key().as_str(),
                value.trigger.category.as_str()
            )));
        }

        let mut actions = Vec::with_capacity(value.actions.len());
        for stored in value.actions {
            if stored.category != stored.payload.category() {
                return Err(AppError::Validation(format!(
                    "action '{}' cannot be stored with category '{}'",
                    stored.payload.handler_key().as_str(),
                    stored.category.as_str()
                )));
            }
            actions.push(stored.payload);
        }

        Self::new(value.trigger.payload, actions)
    }
}

impl From<RuleDetails> for StoredRuleDetails {
    fn from(value: RuleDetails) -> Self {
        Self {
            trigger: StoredPayload {
                category: value.trigger.category(),
                payload: value.trigger,
            },
            actions: value
                .actions
                .into_iter()
                .map(|payload| StoredPayload {
                    category: payload.category(),
                    payload,
                })
                .collect(),
        }
    }
}

/// Persisted automation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    id: RuleId,
    board_id: BoardId,
    creator_id: UserId,
    details: RuleDetails,
    is_enabled: bool,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Input payload used to rebuild a rule from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInput {
    /// Rule identifier.
    pub id: RuleId,
    /// Owning board.
    pub board_id: BoardId,
    /// User who created the rule.
    pub creator_id: UserId,
    /// Trigger and actions.
    pub details: RuleDetails,
    /// Enabled flag.
    pub is_enabled: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp; orders rules that match the same event.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Rule {
    /// Creates a rule from validated parts.
    #[must_use]
    pub fn new(input: RuleInput) -> Self {
        let RuleInput {
            id,
            board_id,
            creator_id,
            details,
            is_enabled,
            is_deleted,
            created_at,
            updated_at,
        } = input;

        Self {
            id,
            board_id,
            creator_id,
            details,
            is_enabled,
            is_deleted,
            created_at,
            updated_at,
        }
    }

    /// Returns rule id.
    #[must_use]
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// Returns owning board id.
    #[must_use]
    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns creator user id.
    #[must_use]
    pub fn creator_id(&self) -> &UserId {
        &self.creator_id
    }

    /// Returns trigger and actions.
    #[must_use]
    pub fn details(&self) -> &RuleDetails {
        &self.details
    }

    /// Returns rule category, derived from the trigger.
    #[must_use]
    pub fn category(&self) -> AutomationCategory {
        self.details.category()
    }

    /// Returns trigger handler key.
    #[must_use]
    pub fn handler_key(&self) -> TriggerHandlerKey {
        self.details.trigger().handler_key()
    }

    /// Returns whether the rule is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Returns whether the rule was soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns whether the rule can fire.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_enabled && !self.is_deleted
    }

    /// Returns creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
