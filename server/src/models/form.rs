use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::views::TypeOption;
use crate::utils::dates::{parse_event_date, DATE_FORMAT_DISPLAY};

pub const EVENT_NAME_MIN_LENGTH: usize = 5;
pub const EVENT_NAME_MAX_LENGTH: usize = 20;
pub const EVENT_DESCRIPTION_MIN_LENGTH: usize = 15;
pub const EVENT_DESCRIPTION_MAX_LENGTH: usize = 150;

/// Event form as submitted by the browser. Every field binds as raw text so a
/// bad submission always reaches validation and can be echoed back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub type_id: String,
}

/// Form values after every check has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvent {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub type_id: i32,
}

/// Validation messages keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl EventForm {
    /// Checks every field and collects all failures. `types` is the current
    /// type list; the selected `type_id` must be one of them.
    pub fn validate(&self, types: &[TypeOption]) -> Result<ValidatedEvent, FieldErrors> {
        let mut errors = FieldErrors::default();

        check_length(
            &mut errors,
            "name",
            "Name",
            &self.name,
            EVENT_NAME_MIN_LENGTH,
            EVENT_NAME_MAX_LENGTH,
        );
        check_length(
            &mut errors,
            "description",
            "Description",
            &self.description,
            EVENT_DESCRIPTION_MIN_LENGTH,
            EVENT_DESCRIPTION_MAX_LENGTH,
        );

        let start_date = check_date(&mut errors, "start", "Start", &self.start);
        let end_date = check_date(&mut errors, "end", "End", &self.end);

        let type_id = check_type(&mut errors, &self.type_id, types);

        match (start_date, end_date, type_id) {
            (Some(start_date), Some(end_date), Some(type_id)) if errors.is_empty() => {
                Ok(ValidatedEvent {
                    name: self.name.clone(),
                    description: self.description.clone(),
                    start_date,
                    end_date,
                    type_id,
                })
            }
            _ => Err(errors),
        }
    }
}

fn check_length(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.add(field, format!("The {} field is required.", label));
        return;
    }

    let length = value.chars().count();
    if length < min || length > max {
        errors.add(
            field,
            format!(
                "The field {} must be a string with a minimum length of {} and a maximum length of {}.",
                label, min, max
            ),
        );
    }
}

fn check_date(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &str,
) -> Option<DateTime<Utc>> {
    if value.trim().is_empty() {
        errors.add(field, format!("The {} field is required.", label));
        return None;
    }

    let parsed = parse_event_date(value);
    if parsed.is_none() {
        errors.add(
            field,
            format!("Invalid {} date: {}", label.to_lowercase(), DATE_FORMAT_DISPLAY),
        );
    }
    parsed
}

fn check_type(errors: &mut FieldErrors, value: &str, types: &[TypeOption]) -> Option<i32> {
    let value = value.trim();
    if value.is_empty() {
        errors.add("type_id", "The TypeId field is required.");
        return None;
    }

    match value.parse::<i32>() {
        Ok(id) if types.iter().any(|t| t.id == id) => Some(id),
        Ok(id) => {
            errors.add("type_id", format!("Unknown event type: {}", id));
            None
        }
        Err(_) => {
            errors.add("type_id", format!("The value '{}' is not valid for TypeId.", value));
            None
        }
    }
}
