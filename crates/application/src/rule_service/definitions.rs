use super::*;

impl RuleService {
    /// Creates a rule on a board the actor manages.
    pub async fn create_rule(
        &self,
        actor: &ActorIdentity,
        input: CreateRuleInput,
    ) -> AppResult<Rule> {
        let board = require_manager(self.boards.as_ref(), actor, input.board_id).await?;
        let now = Utc::now();

        let trigger = match input.trigger {
            TriggerPayload::WhenScheduledXWeeks {
                weeks,
                day,
                anchor_week: None,
            } => TriggerPayload::WhenScheduledXWeeks {
                weeks,
                day,
                anchor_week: Some(week_number_since_epoch(now)),
            },
            trigger => trigger,
        };

        let details = RuleDetails::new(trigger, input.actions)?;
        self.validate_list_references(board.id, &details).await?;

        let rule = Rule::new(RuleInput {
            id: RuleId::new(),
            board_id: board.id,
            creator_id: actor.user_id().clone(),
            details,
            is_enabled: true,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        });

        self.rules.create_rule(rule.clone()).await?;
        tracing::info!(
            rule_id = %rule.id(),
            board_id = %rule.board_id(),
            handler_key = rule.handler_key().as_str(),
            "automation rule created"
        );

        Ok(rule)
    }

    /// Creates a rule from rule builder field maps.
    pub async fn create_rule_from_fields(
        &self,
        actor: &ActorIdentity,
        board_id: BoardId,
        trigger: &TemplateFields,
        actions: &[TemplateFields],
    ) -> AppResult<Rule> {
        let trigger = to_backend_trigger(trigger.template_id.as_str(), &trigger.fields)?;
        let actions = actions
            .iter()
            .map(|action| to_backend_action(action.template_id.as_str(), &action.fields))
            .collect::<Result<Vec<_>, _>>()?;

        self.create_rule(
            actor,
            CreateRuleInput {
                board_id,
                trigger,
                actions,
            },
        )
        .await
    }

    /// Lists enabled rules of one board and category in execution order.
    pub async fn list_rules(
        &self,
        actor: &ActorIdentity,
        board_id: BoardId,
        category: AutomationCategory,
    ) -> AppResult<Vec<Rule>> {
        require_member(self.boards.as_ref(), actor, board_id).await?;
        self.rules.list_active_rules(board_id, category).await
    }

    /// Lists enabled rules with their rendered sentences.
    pub async fn list_rule_summaries(
        &self,
        actor: &ActorIdentity,
        board_id: BoardId,
        category: AutomationCategory,
    ) -> AppResult<Vec<RuleSummary>> {
        let rules = self.list_rules(actor, board_id, category).await?;
        let list_names: HashMap<_, _> = self
            .boards
            .list_lists(board_id)
            .await?
            .into_iter()
            .map(|list| (list.id, list.title))
            .collect();
        let member_names: HashMap<_, _> = self
            .boards
            .list_members(board_id)
            .await?
            .into_iter()
            .map(|member| (member.user_id, member.display_name))
            .collect();

        Ok(rules
            .into_iter()
            .map(|rule| {
                let creator_name = member_names
                    .get(rule.creator_id())
                    .map(String::as_str)
                    .unwrap_or_else(|| rule.creator_id().as_str());
                let sentence = readable_sentence(rule.details(), &list_names, creator_name);
                RuleSummary { rule, sentence }
            })
            .collect())
    }

    /// Enables or disables a rule.
    pub async fn set_rule_enabled(
        &self,
        actor: &ActorIdentity,
        rule_id: RuleId,
        is_enabled: bool,
    ) -> AppResult<Rule> {
        let rule = self.find_live_rule(rule_id).await?;
        require_manager(self.boards.as_ref(), actor, rule.board_id()).await?;

        self.rules
            .set_rule_enabled(rule_id, is_enabled, Utc::now())
            .await
    }

    /// Soft-deletes a rule.
    pub async fn delete_rule(&self, actor: &ActorIdentity, rule_id: RuleId) -> AppResult<()> {
        let rule = self.find_live_rule(rule_id).await?;
        require_manager(self.boards.as_ref(), actor, rule.board_id()).await?;

        self.rules.soft_delete_rule(rule_id, Utc::now()).await?;
        tracing::info!(rule_id = %rule_id, board_id = %rule.board_id(), "automation rule deleted");

        Ok(())
    }

    async fn find_live_rule(&self, rule_id: RuleId) -> AppResult<Rule> {
        self.rules
            .find_rule(rule_id)
            .await?
            .filter(|rule| !rule.is_deleted())
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' not found")))
    }

    async fn validate_list_references(
        &self,
        board_id: BoardId,
        details: &RuleDetails,
    ) -> AppResult<()> {
        let trigger_list = match details.trigger() {
            TriggerPayload::WhenCardAddedToList { list_id, .. } => Some(*list_id),
            _ => None,
        };
        let action_lists = details.actions().iter().filter_map(|action| match action {
            ActionPayload::MoveCopyCardToList { list_id, .. }
            | ActionPayload::CreateCard { list_id, .. }
            | ActionPayload::MoveSelectedList { list_id, .. } => Some(*list_id),
            _ => None,
        });

        for list_id in trigger_list.into_iter().chain(action_lists) {
            let belongs_to_board = self
                .boards
                .find_list(list_id)
                .await?
                .is_some_and(|list| list.board_id == board_id);

            if !belongs_to_board {
                return Err(AppError::Validation(format!(
                    "list '{list_id}' does not belong to board '{board_id}'"
                )));
            }
        }

        Ok(())
    }
}
