pub mod boards;
pub mod health;
pub mod internal_events;
pub mod rules;
pub mod templates;
