use lanewright_domain::{DomainEvent, Rule};

/// Returns the rules that fire for an event, in input order.
///
/// Inactive rules and rules of other boards or categories never match.
#[must_use]
pub fn match_rules<'a>(event: &DomainEvent, rules: &'a [Rule]) -> Vec<&'a Rule> {
    rules
        .iter()
        .filter(|rule| {
            rule.is_active()
                && rule.board_id() == event.board_id()
                && rule.category() == event.category()
                && rule.details().trigger().accepts(event)
                && admits_actor(rule, event)
        })
        .collect()
}

fn admits_actor(rule: &Rule, event: &DomainEvent) -> bool {
    match (rule.details().trigger().actor_relation(), event.actor()) {
        (Some(relation), Some(actor)) => relation.admits(actor, rule.creator_id()),
        (None, None) => true,
        (relation, actor) => {
            tracing::warn!(
                rule_id = %rule.id(),
                event_type = event.event_type(),
                has_relation = relation.is_some(),
                has_actor = actor.is_some(),
                "rejecting rule match with inconsistent actor relation"
            );
            false
        }
    }
}
