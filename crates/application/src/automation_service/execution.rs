use super::*;

/// Board state an event is processed against.
pub(super) struct EventContext {
    pub(super) task_key: String,
    pub(super) envelope: EventEnvelope,
    pub(super) board: Board,
    pub(super) card_id: Option<CardId>,
    pub(super) list_id: Option<ListId>,
}

impl AutomationService {
    /// Processes one delivered event: matches rules and executes their actions.
    ///
    /// Action failures are reported as outcomes. Errors are returned only when
    /// a step cannot be checkpointed or a notification cannot be published, so
    /// the transport retries the delivery and completed steps are replayed.
    pub async fn process_event(&self, envelope: &EventEnvelope) -> AppResult<EventSummary> {
        let context = match self.load_context(envelope).await? {
            Ok(context) => context,
            Err(message) => {
                tracing::info!(
                    event_id = envelope.id.as_str(),
                    event_type = envelope.event.event_type(),
                    reason = message,
                    "automation event aborted"
                );
                return Ok(EventSummary::aborted(envelope.id.clone(), message));
            }
        };

        let rules = self
            .rules
            .list_active_rules(context.board.id, envelope.event.category())
            .await?;
        let matched = match_rules(&envelope.event, &rules);

        let mut executions = Vec::with_capacity(matched.len());
        for rule in matched {
            executions.push(self.execute_rule(rule, &context).await?);
        }

        let summary = EventSummary {
            event_id: envelope.id.clone(),
            message: None,
            rules: executions,
        };

        tracing::info!(
            event_id = summary.event_id.as_str(),
            event_type = envelope.event.event_type(),
            board_id = %context.board.id,
            rules = summary.rules.len(),
            succeeded = summary.count(OutcomeStatus::Success),
            skipped = summary.count(OutcomeStatus::Skipped),
            failed = summary.count(OutcomeStatus::Failed),
            "automation event processed"
        );

        Ok(summary)
    }

    async fn load_context(
        &self,
        envelope: &EventEnvelope,
    ) -> AppResult<Result<EventContext, &'static str>> {
        let event = &envelope.event;
        let Some(board) = self.boards.find_board(event.board_id()).await? else {
            return Ok(Err("board not found"));
        };

        let mut list_id = None;
        let card_id = event.card_id();
        if let Some(card_id) = card_id {
            match self.boards.find_card(card_id).await? {
                Some(card) if card.board_id == board.id => list_id = Some(card.list_id),
                _ => return Ok(Err("card not found")),
            }
        } else if let DomainEvent::ListCreated {
            list_id: created_list_id,
            ..
        } = event
        {
            match self.boards.find_list(*created_list_id).await? {
                Some(list) if list.board_id == board.id => list_id = Some(list.id),
                _ => return Ok(Err("list not found")),
            }
        }

        Ok(Ok(EventContext {
            task_key: format!("event:{}", envelope.id),
            envelope: envelope.clone(),
            board,
            card_id,
            list_id,
        }))
    }

    async fn execute_rule(&self, rule: &Rule, context: &EventContext) -> AppResult<RuleExecution> {
        let mut outcomes = Vec::with_capacity(rule.details().actions().len());

        for (index, action) in rule.details().actions().iter().enumerate() {
            let step_key = format!("rule:{}:action:{index}", rule.id());
            let outcome = run_step(
                self.journal.as_ref(),
                context.task_key.as_str(),
                step_key.as_str(),
                self.execute_action(rule, index, action, context),
            )
            .await?;

            if !outcome.is_success() {
                tracing::warn!(
                    event_id = context.envelope.id.as_str(),
                    rule_id = %rule.id(),
                    action = outcome.action.as_str(),
                    status = outcome.status.as_str(),
                    details = outcome.details.as_deref().unwrap_or_default(),
                    "automation action did not succeed"
                );
            }
            outcomes.push(outcome);
        }

        let mut execution = RuleExecution {
            rule_id: rule.id(),
            outcomes,
            notified: false,
        };

        if execution.all_succeeded() {
            let step_key = format!("rule:{}:notify", rule.id());
            let notified = run_step(
                self.journal.as_ref(),
                context.task_key.as_str(),
                step_key.as_str(),
                self.publish_execution(&execution, context),
            )
            .await?;
            execution.notified = notified;
        }

        Ok(execution)
    }

    async fn publish_execution(
        &self,
        execution: &RuleExecution,
        context: &EventContext,
    ) -> AppResult<bool> {
        let payload = json!({
            "ruleId": execution.rule_id,
            "eventId": context.envelope.id,
            "eventType": context.envelope.event.event_type(),
            "outcomes": execution.outcomes,
        });

        self.publisher
            .publish(
                context.board.channel().as_str(),
                AUTOMATION_EXECUTED_EVENT,
                payload,
            )
            .await?;

        Ok(true)
    }
}
