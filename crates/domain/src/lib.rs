//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod automation;
mod board;
mod calendar;
mod codec;
mod event;
mod outcome;
mod position;
mod sentence;
mod template;

pub use automation::{
    ActionHandlerKey, ActionPayload, ActorRelation, AutomationCategory, BoardCardPosition,
    CardTransfer, CompletionStatus, DailyInterval, ListEdge, ListPlacement, MemberStrategy,
    Rule, RuleDetails, RuleInput, TriggerHandlerKey, TriggerPayload, WeekDay,
};
pub use board::{Board, BoardList, BoardMember, BoardRole, Card};
pub use calendar::{CalendarFacts, MILLIS_PER_WEEK, week_number_since_epoch};
pub use codec::{
    FieldErrors, FieldIssue, TemplateFields, UiField, UiFieldMap, to_backend_action,
    to_backend_trigger, to_ui_field_map_for_action, to_ui_field_map_for_trigger,
};
pub use event::{DomainEvent, EventEnvelope};
pub use outcome::{ActionOutcome, EventSummary, OutcomeStatus, RuleExecution};
pub use position::{
    GapDirection, POSITION_GAP, assign_gap_position, dense_positions, reorder_within,
};
pub use sentence::readable_sentence;
pub use template::{
    AutomationTemplate, Part, PartKind, SelectOption, TemplateHandler, action_templates,
    find_template, trigger_templates,
};
