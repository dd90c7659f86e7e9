use std::collections::BTreeMap;

use lanewright_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::automation::{ActionPayload, TriggerPayload};
use crate::template::{
    AutomationTemplate, Part, PartKind, TemplateHandler, find_template, template_for_handler,
};

/// One entry of the rule builder field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiField {
    /// Part kind tag, for example `select`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw field value.
    pub value: Value,
}

/// Rule builder field map keyed by globally unique part id.
pub type UiFieldMap = BTreeMap<String, UiField>;

/// Field map together with the template it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFields {
    /// Template id.
    pub template_id: String,
    /// Field values keyed by part id.
    pub fields: UiFieldMap,
}

/// One invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Part id, or `templateId` when the template itself is unknown.
    pub field: String,
    /// Human-readable problem.
    pub message: String,
}

/// Field-indexed validation failure from the codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid automation fields: {}", render_issues(.issues))]
pub struct FieldErrors {
    issues: Vec<FieldIssue>,
}

impl FieldErrors {
    fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// Returns all collected issues.
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        self.issues.as_slice()
    }
}

impl From<FieldErrors> for AppError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

fn render_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Converts a trigger template field map into a strict trigger payload.
pub fn to_backend_trigger(
    template_id: &str,
    fields: &UiFieldMap,
) -> Result<TriggerPayload, FieldErrors> {
    let template = find_template(template_id)
        .filter(|template| matches!(template.handler, TemplateHandler::Trigger(_)))
        .ok_or_else(|| {
            FieldErrors::single("templateId", format!("unknown trigger template '{template_id}'"))
        })?;

    decode_payload(template, fields)
}

/// Converts an action template field map into a strict action payload.
pub fn to_backend_action(
    template_id: &str,
    fields: &UiFieldMap,
) -> Result<ActionPayload, FieldErrors> {
    let template = find_template(template_id)
        .filter(|template| matches!(template.handler, TemplateHandler::Action(_)))
        .ok_or_else(|| {
            FieldErrors::single("templateId", format!("unknown action template '{template_id}'"))
        })?;

    decode_payload(template, fields)
}

/// Converts a trigger payload back into its template field map.
pub fn to_ui_field_map_for_trigger(payload: &TriggerPayload) -> AppResult<TemplateFields> {
    encode_payload(TemplateHandler::Trigger(payload.handler_key()), payload)
}

/// Converts an action payload back into its template field map.
pub fn to_ui_field_map_for_action(payload: &ActionPayload) -> AppResult<TemplateFields> {
    encode_payload(TemplateHandler::Action(payload.handler_key()), payload)
}

fn decode_payload<T: DeserializeOwned>(
    template: &AutomationTemplate,
    fields: &UiFieldMap,
) -> Result<T, FieldErrors> {
    let mut issues = Vec::new();
    let mut object = Map::new();
    object.insert(
        "handlerKey".to_owned(),
        Value::String(template.handler.as_str().to_owned()),
    );

    for field_id in fields.keys() {
        if !template.parts.iter().any(|part| part.id == field_id) {
            issues.push(FieldIssue {
                field: field_id.clone(),
                message: format!("is not a part of template '{}'", template.id),
            });
        }
    }

    for part in template.parts.iter().filter(|part| part.carries_input()) {
        let Some(field) = fields.get(part.id) else {
            issues.push(FieldIssue {
                field: part.id.to_owned(),
                message: "is required".to_owned(),
            });
            continue;
        };

        match decode_field(part, field) {
            Ok(value) => {
                object.insert(part.field_name().to_owned(), value);
            }
            Err(message) => issues.push(FieldIssue {
                field: part.id.to_owned(),
                message,
            }),
        }
    }

    if !issues.is_empty() {
        return Err(FieldErrors { issues });
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|error| FieldErrors::single(template.id, error.to_string()))
}

fn decode_field(part: &Part, field: &UiField) -> Result<Value, String> {
    if field.kind != part.kind.tag() {
        return Err(format!(
            "expected a '{}' field, got '{}'",
            part.kind.tag(),
            field.kind
        ));
    }

    match part.kind {
        PartKind::TextDisplay { .. } => Err("carries no input".to_owned()),
        PartKind::TextInput { .. } => {
            let text = field
                .value
                .as_str()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .ok_or_else(|| "must be non-empty text".to_owned())?;
            Ok(Value::String(text.to_owned()))
        }
        PartKind::NumberInput { min, max } => {
            let number = match &field.value {
                Value::Number(number) => number.as_i64(),
                Value::String(text) => text.trim().parse::<i64>().ok(),
                _ => None,
            }
            .ok_or_else(|| "must be an integer".to_owned())?;

            if !(min..=max).contains(&number) {
                return Err(format!("must be between {min} and {max}"));
            }

            Ok(Value::from(number))
        }
        PartKind::Select { options } => {
            let value = field
                .value
                .as_str()
                .ok_or_else(|| "must be one of the listed options".to_owned())?;

            options
                .iter()
                .find(|option| option.value == value)
                .map(|option| Value::String(option.value.to_owned()))
                .ok_or_else(|| format!("'{value}' is not one of the listed options"))
        }
        PartKind::ListCombobox => {
            let value = field
                .value
                .as_str()
                .ok_or_else(|| "must reference a list".to_owned())?;

            Uuid::parse_str(value.trim())
                .map(|list_id| Value::String(list_id.to_string()))
                .map_err(|_| format!("'{value}' is not a list id"))
        }
    }
}

fn encode_payload<T: Serialize>(
    handler: TemplateHandler,
    payload: &T,
) -> AppResult<TemplateFields> {
    let template = template_for_handler(handler).ok_or_else(|| {
        AppError::Internal(format!("no template registered for '{}'", handler.as_str()))
    })?;

    let value = serde_json::to_value(payload).map_err(|error| {
        AppError::Internal(format!(
            "failed to encode '{}' payload: {error}",
            handler.as_str()
        ))
    })?;

    let mut fields = UiFieldMap::new();
    for part in template.parts {
        let value = match part.kind {
            PartKind::TextDisplay { text } => Some(Value::String(text.to_owned())),
            _ => value.get(part.field_name()).cloned(),
        };

        if let Some(value) = value {
            fields.insert(
                part.id.to_owned(),
                UiField {
                    kind: part.kind.tag().to_owned(),
                    value,
                },
            );
        }
    }

    Ok(TemplateFields {
        template_id: template.id.to_owned(),
        fields,
    })
}
