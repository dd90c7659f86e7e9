//! Application services and ports.

#![forbid(unsafe_code)]

mod automation_ports;
mod automation_service;
mod board_access;
mod board_service;
mod rule_service;
mod schedule_service;
mod step_checkpoint;

#[cfg(test)]
mod test_support;

pub use automation_ports::{
    BoardRepository, CardPlacement, ClaimedEvent, EventQueue, EventTransport, ListPosition,
    NewCard, NewList, RealtimePublisher, RuleRepository, ScheduledRuleIndex, StepJournal,
};
pub use automation_service::{AUTOMATION_EXECUTED_EVENT, AutomationService, match_rules};
pub use board_service::BoardService;
pub use rule_service::{CreateRuleInput, RuleService, RuleSummary};
pub use schedule_service::{FanOutSummary, ScheduleService};
