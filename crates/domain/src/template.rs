use serde::Serialize;

use crate::automation::{ActionHandlerKey, AutomationCategory, TriggerHandlerKey};

/// One option of a select part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Label shown in the rule builder.
    pub label: &'static str,
    /// Stored value.
    pub value: &'static str,
}

/// Input kind of one template part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PartKind {
    /// Static label without user input.
    TextDisplay {
        /// Rendered text.
        text: &'static str,
    },
    /// Free text.
    TextInput {
        /// Placeholder shown when empty.
        placeholder: &'static str,
    },
    /// Integer within an inclusive range.
    NumberInput {
        /// Minimum accepted value.
        min: i64,
        /// Maximum accepted value.
        max: i64,
    },
    /// One of an ordered option set.
    Select {
        /// Allowed options.
        options: &'static [SelectOption],
    },
    /// Reference to a list on the same board.
    ListCombobox,
}

impl PartKind {
    /// Returns the wire tag of this kind.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::TextDisplay { .. } => "text-display",
            Self::TextInput { .. } => "text-input",
            Self::NumberInput { .. } => "number-input",
            Self::Select { .. } => "select",
            Self::ListCombobox => "list-combobox",
        }
    }
}

/// One visual or input slot of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Part {
    /// Globally unique part id.
    pub id: &'static str,
    /// Part kind.
    #[serde(flatten)]
    pub kind: PartKind,
}

impl Part {
    /// Returns the short field name: the token after the last hyphen.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        self.id.rsplit('-').next().unwrap_or(self.id)
    }

    /// Returns whether the part carries user input.
    #[must_use]
    pub fn carries_input(&self) -> bool {
        !matches!(self.kind, PartKind::TextDisplay { .. })
    }
}

/// Backend behavior selected by a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "handlerKey", rename_all = "snake_case")]
pub enum TemplateHandler {
    /// Trigger template.
    Trigger(TriggerHandlerKey),
    /// Action template.
    Action(ActionHandlerKey),
}

impl TemplateHandler {
    /// Returns the handler key string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trigger(key) => key.as_str(),
            Self::Action(key) => key.as_str(),
        }
    }
}

/// Rule builder blueprint for one trigger or action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationTemplate {
    /// Stable template id.
    pub id: &'static str,
    /// Template category.
    pub category: AutomationCategory,
    /// Backend handler.
    pub handler: TemplateHandler,
    /// Ordered parts.
    pub parts: &'static [Part],
}

const ACTOR_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "by me",
        value: "ME",
    },
    SelectOption {
        label: "by anyone",
        value: "ANYONE",
    },
    SelectOption {
        label: "by anyone except me",
        value: "ANYONE_EXCEPT_ME",
    },
];

const STATUS_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "complete",
        value: "complete",
    },
    SelectOption {
        label: "incomplete",
        value: "incomplete",
    },
];

const INTERVAL_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "every day",
        value: "DAY",
    },
    SelectOption {
        label: "every weekday",
        value: "WEEKDAY",
    },
];

const DAY_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "Sunday",
        value: "sun",
    },
    SelectOption {
        label: "Monday",
        value: "mon",
    },
    SelectOption {
        label: "Tuesday",
        value: "tue",
    },
    SelectOption {
        label: "Wednesday",
        value: "wed",
    },
    SelectOption {
        label: "Thursday",
        value: "thu",
    },
    SelectOption {
        label: "Friday",
        value: "fri",
    },
    SelectOption {
        label: "Saturday",
        value: "sat",
    },
];

const TRANSFER_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "move",
        value: "move",
    },
    SelectOption {
        label: "copy",
        value: "copy",
    },
];

const EDGE_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "to the top of",
        value: "top",
    },
    SelectOption {
        label: "to the bottom of",
        value: "bottom",
    },
];

const BOARD_POSITION_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "to the top of its list",
        value: "top",
    },
    SelectOption {
        label: "to the bottom of its list",
        value: "bottom",
    },
    SelectOption {
        label: "to the next list",
        value: "next_list",
    },
    SelectOption {
        label: "to the previous list",
        value: "previous_list",
    },
];

const STRATEGY_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "a random member",
        value: "random",
    },
    SelectOption {
        label: "members in turn",
        value: "round_robin",
    },
];

const PLACEMENT_OPTIONS: &[SelectOption] = &[
    SelectOption {
        label: "first",
        value: "first",
    },
    SelectOption {
        label: "last",
        value: "last",
    },
];

const fn display(id: &'static str, text: &'static str) -> Part {
    Part {
        id,
        kind: PartKind::TextDisplay { text },
    }
}

const fn select(id: &'static str, options: &'static [SelectOption]) -> Part {
    Part {
        id,
        kind: PartKind::Select { options },
    }
}

const fn list(id: &'static str) -> Part {
    Part {
        id,
        kind: PartKind::ListCombobox,
    }
}

const TEMPLATES: &[AutomationTemplate] = &[
    AutomationTemplate {
        id: "when-card-created",
        category: AutomationCategory::Rule,
        handler: TemplateHandler::Trigger(TriggerHandlerKey::WhenCardCreated),
        parts: &[
            display("trigger-card-created-label", "when a card is created in this board"),
            select("trigger-card-created-by", ACTOR_OPTIONS),
        ],
    },
    AutomationTemplate {
        id: "when-card-added-to-list",
        category: AutomationCategory::Rule,
        handler: TemplateHandler::Trigger(TriggerHandlerKey::WhenCardAddedToList),
        parts: &[
            display("trigger-card-added-to-list-label", "when a card is added to list"),
            list("trigger-card-added-to-list-listId"),
            select("trigger-card-added-to-list-by", ACTOR_OPTIONS),
        ],
    },
    AutomationTemplate {
        id: "when-card-marked-complete",
        category: AutomationCategory::Rule,
        handler: TemplateHandler::Trigger(TriggerHandlerKey::WhenCardMarkedComplete),
        parts: &[
            display("trigger-card-marked-complete-label", "when a card is marked as"),
            select("trigger-card-marked-complete-status", STATUS_OPTIONS),
            select("trigger-card-marked-complete-by", ACTOR_OPTIONS),
        ],
    },
    AutomationTemplate {
        id: "when-list-created",
        category: AutomationCategory::Rule,
        handler: TemplateHandler::Trigger(TriggerHandlerKey::WhenListCreated),
        parts: &[
            display("trigger-list-created-label", "when a list is created"),
            select("trigger-list-created-by", ACTOR_OPTIONS),
        ],
    },
    AutomationTemplate {
        id: "when-scheduled-daily",
        category: AutomationCategory::Scheduled,
        handler: TemplateHandler::Trigger(TriggerHandlerKey::WhenScheduledDaily),
        parts: &[select("trigger-scheduled-daily-interval", INTERVAL_OPTIONS)],
    },
    AutomationTemplate {
        id: "when-scheduled-weekly",
        category: AutomationCategory::Scheduled,
        handler: TemplateHandler::Trigger(TriggerHandlerKey::WhenScheduledWeekly),
        parts: &[
            display("trigger-scheduled-weekly-label", "every week on"),
            select("trigger-scheduled-weekly-day", DAY_OPTIONS),
        ],
    },
    AutomationTemplate {
        id: "when-scheduled-x-weeks",
        category: AutomationCategory::Scheduled,
        handler: TemplateHandler::Trigger(TriggerHandlerKey::WhenScheduledXWeeks),
        parts: &[
            display("trigger-scheduled-x-weeks-label", "every"),
            Part {
                id: "trigger-scheduled-x-weeks-weeks",
                kind: PartKind::NumberInput { min: 1, max: 52 },
            },
            display("trigger-scheduled-x-weeks-on", "weeks on"),
            select("trigger-scheduled-x-weeks-day", DAY_OPTIONS),
        ],
    },
    AutomationTemplate {
        id: "move-copy-card-to-list",
        category: AutomationCategory::Rule,
        handler: TemplateHandler::Action(ActionHandlerKey::MoveCopyCardToList),
        parts: &[
            select("action-move-copy-card-to-list-action", TRANSFER_OPTIONS),
            display("action-move-copy-card-to-list-card", "the card"),
            select("action-move-copy-card-to-list-position", EDGE_OPTIONS),
            display("action-move-copy-card-to-list-label", "list"),
            list("action-move-copy-card-to-list-listId"),
        ],
    },
    AutomationTemplate {
        id: "move-card-in-board",
        category: AutomationCategory::Rule,
        handler: TemplateHandler::Action(ActionHandlerKey::MoveCardInBoard),
        parts: &[
            display("action-move-card-in-board-label", "move the card"),
            select("action-move-card-in-board-position", BOARD_POSITION_OPTIONS),
        ],
    },
    AutomationTemplate {
        id: "mark-card-status",
        category: AutomationCategory::Rule,
        handler: TemplateHandler::Action(ActionHandlerKey::MarkCardStatus),
        parts: &[
            display("action-mark-card-status-label", "mark the card as"),
            select("action-mark-card-status-status", STATUS_OPTIONS),
        ],
    },
    AutomationTemplate {
        id: "add-member",
        category: AutomationCategory::Rule,
        handler: TemplateHandler::Action(ActionHandlerKey::AddMember),
        parts: &[
            display("action-add-member-label", "add"),
            select("action-add-member-strategy", STRATEGY_OPTIONS),
            display("action-add-member-suffix", "to the card"),
        ],
    },
    AutomationTemplate {
        id: "move-list",
        category: AutomationCategory::Rule,
        handler: TemplateHandler::Action(ActionHandlerKey::MoveList),
        parts: &[
            display("action-move-list-label", "move the list to the"),
            select("action-move-list-position", PLACEMENT_OPTIONS),
            display("action-move-list-suffix", "position"),
        ],
    },
    AutomationTemplate {
        id: "create-card",
        category: AutomationCategory::Scheduled,
        handler: TemplateHandler::Action(ActionHandlerKey::CreateCard),
        parts: &[
            display("action-create-card-label", "create a card titled"),
            Part {
                id: "action-create-card-title",
                kind: PartKind::TextInput {
                    placeholder: "Card title",
                },
            },
            display("action-create-card-in", "in list"),
            list("action-create-card-listId"),
        ],
    },
    AutomationTemplate {
        id: "move-selected-list",
        category: AutomationCategory::Scheduled,
        handler: TemplateHandler::Action(ActionHandlerKey::MoveSelectedList),
        parts: &[
            display("action-move-selected-list-label", "move list"),
            list("action-move-selected-list-listId"),
            display("action-move-selected-list-to", "to the"),
            select("action-move-selected-list-position", PLACEMENT_OPTIONS),
            display("action-move-selected-list-suffix", "position"),
        ],
    },
];

/// Returns trigger templates of one category in catalog order.
#[must_use]
pub fn trigger_templates(category: AutomationCategory) -> Vec<&'static AutomationTemplate> {
    TEMPLATES
        .iter()
        .filter(|template| {
            template.category == category && matches!(template.handler, TemplateHandler::Trigger(_))
        })
        .collect()
}

/// Returns action templates of one category in catalog order.
#[must_use]
pub fn action_templates(category: AutomationCategory) -> Vec<&'static AutomationTemplate> {
    TEMPLATES
        .iter()
        .filter(|template| {
            template.category == category && matches!(template.handler, TemplateHandler::Action(_))
        })
        .collect()
}

/// Finds a template by id.
#[must_use]
pub fn find_template(id: &str) -> Option<&'static AutomationTemplate> {
    TEMPLATES.iter().find(|template| template.id == id)
}

pub(crate) fn template_for_handler(
    handler: TemplateHandler,
) -> Option<&'static AutomationTemplate> {
    TEMPLATES.iter().find(|template| template.handler == handler)
}
