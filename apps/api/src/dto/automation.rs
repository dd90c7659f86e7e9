use lanewright_domain::{
    ActionPayload, AutomationCategory, AutomationTemplate, TemplateFields, TriggerPayload,
    action_templates, trigger_templates,
};
use serde::{Deserialize, Serialize};

/// Category filter shared by rule listing and the template catalog.
#[derive(Debug, Default, Deserialize)]
pub struct RuleCategoryQuery {
    pub category: Option<AutomationCategory>,
}

impl RuleCategoryQuery {
    /// Returns the requested category, defaulting to event rules.
    #[must_use]
    pub fn category(&self) -> AutomationCategory {
        self.category.unwrap_or(AutomationCategory::Rule)
    }
}

/// Rule creation payload with backend trigger and actions.
#[derive(Debug, Deserialize)]
pub struct CreateRuleRequest {
    pub trigger: TriggerPayload,
    pub actions: Vec<ActionPayload>,
}

/// Rule creation payload as produced by the rule builder.
#[derive(Debug, Deserialize)]
pub struct CreateRuleFromFieldsRequest {
    pub trigger: TemplateFields,
    pub actions: Vec<TemplateFields>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRuleEnabledRequest {
    pub is_enabled: bool,
}

/// Trigger and action templates of one category.
#[derive(Debug, Serialize)]
pub struct TemplateCatalogResponse {
    pub category: AutomationCategory,
    pub triggers: Vec<&'static AutomationTemplate>,
    pub actions: Vec<&'static AutomationTemplate>,
}

impl From<AutomationCategory> for TemplateCatalogResponse {
    fn from(category: AutomationCategory) -> Self {
        Self {
            category,
            triggers: trigger_templates(category),
            actions: action_templates(category),
        }
    }
}
