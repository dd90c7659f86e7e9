use std::collections::HashMap;

use lanewright_core::ListId;

use crate::automation::{
    ActionPayload, ActorRelation, BoardCardPosition, CardTransfer, CompletionStatus,
    DailyInterval, ListEdge, ListPlacement, MemberStrategy, RuleDetails, TriggerPayload, WeekDay,
};

const LIST_FALLBACK: &str = "a list";

/// Renders one human-readable sentence for a rule.
#[must_use]
pub fn readable_sentence(
    details: &RuleDetails,
    list_names: &HashMap<ListId, String>,
    creator_name: &str,
) -> String {
    let labels = Labels {
        list_names,
        creator_name,
    };

    let actions: Vec<String> = details
        .actions()
        .iter()
        .map(|action| labels.action_clause(action))
        .collect();

    let mut sentence = labels.trigger_clause(details.trigger());
    if !actions.is_empty() {
        sentence.push_str(", ");
        sentence.push_str(&actions.join(", then "));
    }
    sentence.push('.');
    capitalize(&sentence)
}

struct Labels<'a> {
    list_names: &'a HashMap<ListId, String>,
    creator_name: &'a str,
}

impl Labels<'_> {
    fn trigger_clause(&self, trigger: &TriggerPayload) -> String {
        match trigger {
            TriggerPayload::WhenCardCreated { by } => {
                format!("when a card is created in this board {}", self.actor(*by))
            }
            TriggerPayload::WhenCardAddedToList { list_id, by } => format!(
                "when a card is added to {} {}",
                self.list(*list_id),
                self.actor(*by)
            ),
            TriggerPayload::WhenCardMarkedComplete { status, by } => format!(
                "when a card is marked as {} {}",
                status_label(*status),
                self.actor(*by)
            ),
            TriggerPayload::WhenListCreated { by } => {
                format!("when a list is created {}", self.actor(*by))
            }
            TriggerPayload::WhenScheduledDaily { interval } => match interval {
                DailyInterval::Day => "every day".to_owned(),
                DailyInterval::Weekday => "every weekday".to_owned(),
            },
            TriggerPayload::WhenScheduledWeekly { day } => {
                format!("every week on {}", day_label(*day))
            }
            TriggerPayload::WhenScheduledXWeeks { weeks: 1, day, .. } => {
                format!("every week on {}", day_label(*day))
            }
            TriggerPayload::WhenScheduledXWeeks { weeks, day, .. } => {
                format!("every {weeks} weeks on {}", day_label(*day))
            }
        }
    }

    fn action_clause(&self, action: &ActionPayload) -> String {
        match action {
            ActionPayload::MoveCopyCardToList {
                action,
                position,
                list_id,
            } => {
                let verb = match action {
                    CardTransfer::Move => "move",
                    CardTransfer::Copy => "copy",
                };
                let edge = match position {
                    ListEdge::Top => "to the top of",
                    ListEdge::Bottom => "to the bottom of",
                };
                format!("{verb} the card {edge} {}", self.list(*list_id))
            }
            ActionPayload::MoveCardInBoard { position } => {
                let target = match position {
                    BoardCardPosition::Top => "to the top of its list",
                    BoardCardPosition::Bottom => "to the bottom of its list",
                    BoardCardPosition::NextList => "to the next list",
                    BoardCardPosition::PreviousList => "to the previous list",
                };
                format!("move the card {target}")
            }
            ActionPayload::MarkCardStatus { status } => {
                format!("mark the card as {}", status_label(*status))
            }
            ActionPayload::AddMember { strategy } => {
                let member = match strategy {
                    MemberStrategy::Random => "a random member",
                    MemberStrategy::RoundRobin => "members in turn",
                };
                format!("add {member} to the card")
            }
            ActionPayload::MoveList { position } => {
                format!("move the list to the {} position", placement_label(*position))
            }
            ActionPayload::CreateCard { title, list_id } => {
                format!("create a card titled \"{title}\" in {}", self.list(*list_id))
            }
            ActionPayload::MoveSelectedList { list_id, position } => format!(
                "move {} to the {} position",
                self.list(*list_id),
                placement_label(*position)
            ),
        }
    }

    fn actor(&self, by: ActorRelation) -> String {
        match by {
            ActorRelation::Me => format!("by {}", self.creator_name),
            ActorRelation::Anyone => "by anyone".to_owned(),
            ActorRelation::AnyoneExceptMe => format!("by anyone except {}", self.creator_name),
        }
    }

    fn list(&self, list_id: ListId) -> String {
        self.list_names
            .get(&list_id)
            .map(|name| format!("list \"{name}\""))
            .unwrap_or_else(|| LIST_FALLBACK.to_owned())
    }
}

fn status_label(status: CompletionStatus) -> &'static str {
    match status {
        CompletionStatus::Complete => "complete",
        CompletionStatus::Incomplete => "incomplete",
    }
}

fn placement_label(placement: ListPlacement) -> &'static str {
    match placement {
        ListPlacement::First => "first",
        ListPlacement::Last => "last",
    }
}

fn day_label(day: WeekDay) -> &'static str {
    match day {
        WeekDay::Sun => "Sunday",
        WeekDay::Mon => "Monday",
        WeekDay::Tue => "Tuesday",
        WeekDay::Wed => "Wednesday",
        WeekDay::Thu => "Thursday",
        WeekDay::Fri => "Friday",
        WeekDay::Sat => "Saturday",
    }
}

fn capitalize(sentence: &str) -> String {
    let mut characters = sentence.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new(),
    }
}
