mod board;
mod journal;
mod realtime;
mod rules;
mod transport;

pub use board::{BoardRepository, CardPlacement, ListPosition, NewCard, NewList};
pub use journal::StepJournal;
pub use realtime::RealtimePublisher;
pub use rules::{RuleRepository, ScheduledRuleIndex};
pub use transport::{ClaimedEvent, EventQueue, EventTransport};
