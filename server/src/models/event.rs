use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::form::ValidatedEvent;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub organiser_id: Uuid,
    pub created_on: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub type_id: i32,
}

impl Event {
    pub fn is_organised_by(&self, user_id: Uuid) -> bool {
        self.organiser_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub organiser_id: Uuid,
    pub created_on: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub type_id: i32,
}

impl NewEvent {
    pub fn from_validated(
        event: ValidatedEvent,
        organiser_id: Uuid,
        created_on: DateTime<Utc>,
    ) -> Self {
        Self {
            name: event.name,
            description: event.description,
            organiser_id,
            created_on,
            start_date: event.start_date,
            end_date: event.end_date,
            type_id: event.type_id,
        }
    }
}

/// Listing row: an event joined with its type and organiser names.
#[derive(Debug, Clone, FromRow)]
pub struct EventSummary {
    pub id: i32,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub type_name: String,
    pub organiser: String,
}

/// Every descriptive field of one event, with names resolved.
#[derive(Debug, Clone, FromRow)]
pub struct EventDescription {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_on: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub type_name: String,
    pub organiser: String,
}
