use serde::Serialize;

use super::event::{Event, EventDescription, EventSummary};
use super::event_type::EventType;
use super::form::{EventForm, FieldErrors};
use crate::utils::dates::format_event_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeOption {
    pub id: i32,
    pub name: String,
}

impl From<EventType> for TypeOption {
    fn from(value: EventType) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// One row of the event listings.
#[derive(Debug, Clone, Serialize)]
pub struct EventInfo {
    pub id: i32,
    pub name: String,
    pub start: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub organiser: String,
}

impl From<EventSummary> for EventInfo {
    fn from(value: EventSummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
            start: format_event_date(&value.start_date),
            type_name: value.type_name,
            organiser: value.organiser,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub created_on: String,
    pub organiser: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl From<EventDescription> for EventDetails {
    fn from(value: EventDescription) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            start: format_event_date(&value.start_date),
            end: format_event_date(&value.end_date),
            created_on: format_event_date(&value.created_on),
            organiser: value.organiser,
            type_name: value.type_name,
        }
    }
}

/// Add/edit form as rendered back to the client. It always carries the type
/// list so a re-rendered form never shows an empty selector.
#[derive(Debug, Clone, Serialize)]
pub struct EventFormView {
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    pub start: String,
    pub end: String,
    /// Selected type as submitted; raw so invalid input can be echoed back.
    pub type_id: String,
    pub types: Vec<TypeOption>,
    pub errors: FieldErrors,
}

impl EventFormView {
    pub fn empty(types: Vec<TypeOption>) -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            start: String::new(),
            end: String::new(),
            type_id: String::new(),
            types,
            errors: FieldErrors::default(),
        }
    }

    pub fn for_event(event: &Event, types: Vec<TypeOption>) -> Self {
        Self {
            id: Some(event.id),
            name: event.name.clone(),
            description: event.description.clone(),
            start: format_event_date(&event.start_date),
            end: format_event_date(&event.end_date),
            type_id: event.type_id.to_string(),
            types,
            errors: FieldErrors::default(),
        }
    }

    /// The submitted values, echoed back with their errors.
    pub fn rejected(
        id: Option<i32>,
        form: EventForm,
        types: Vec<TypeOption>,
        errors: FieldErrors,
    ) -> Self {
        Self {
            id,
            name: form.name,
            description: form.description,
            start: form.start,
            end: form.end,
            type_id: form.type_id,
            types,
            errors,
        }
    }
}
