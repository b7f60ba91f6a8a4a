use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{EventStore, StoreError};
use crate::models::{
    Event, EventDescription, EventSummary, EventType, NewEvent, User, ValidatedEvent,
};

/// Types seeded into a fresh store, matching the initial migration.
pub const DEFAULT_TYPES: [&str; 4] = ["Animals", "Fun", "Discussion", "Work"];

#[derive(Default)]
struct Tables {
    types: Vec<EventType>,
    users: HashMap<Uuid, String>,
    events: BTreeMap<i32, Event>,
    participants: BTreeSet<(i32, Uuid)>,
    next_event_id: i32,
}

impl Tables {
    fn type_name(&self, id: i32) -> String {
        self.types
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.clone())
            .unwrap_or_default()
    }

    fn user_name(&self, id: Uuid) -> String {
        self.users.get(&id).cloned().unwrap_or_default()
    }

    fn summarize(&self, event: &Event) -> EventSummary {
        EventSummary {
            id: event.id,
            name: event.name.clone(),
            start_date: event.start_date,
            type_name: self.type_name(event.type_id),
            organiser: self.user_name(event.organiser_id),
        }
    }
}

/// In-process store with the same semantics as the Postgres one.
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_types(&DEFAULT_TYPES)
    }

    pub fn with_types(names: &[&str]) -> Self {
        let types = names
            .iter()
            .zip(1..)
            .map(|(name, id)| EventType {
                id,
                name: name.to_string(),
            })
            .collect();

        Self {
            tables: Mutex::new(Tables {
                types,
                next_event_id: 1,
                ..Tables::default()
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn list_types(&self) -> Result<Vec<EventType>, StoreError> {
        Ok(self.tables.lock().await.types.clone())
    }

    async fn upsert_user(&self, user: &User) -> Result<(), StoreError> {
        self.tables
            .lock()
            .await
            .users
            .insert(user.id, user.user_name.clone());
        Ok(())
    }

    async fn list_events(&self) -> Result<Vec<EventSummary>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .events
            .values()
            .map(|event| tables.summarize(event))
            .collect())
    }

    async fn list_joined(&self, helper_id: Uuid) -> Result<Vec<EventSummary>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .participants
            .iter()
            .filter(|(_, helper)| *helper == helper_id)
            .filter_map(|(event_id, _)| tables.events.get(event_id))
            .map(|event| tables.summarize(event))
            .collect())
    }

    async fn find_event(&self, id: i32) -> Result<Option<Event>, StoreError> {
        Ok(self.tables.lock().await.events.get(&id).cloned())
    }

    async fn describe_event(&self, id: i32) -> Result<Option<EventDescription>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.events.get(&id).map(|event| EventDescription {
            id: event.id,
            name: event.name.clone(),
            description: event.description.clone(),
            created_on: event.created_on,
            start_date: event.start_date,
            end_date: event.end_date,
            type_name: tables.type_name(event.type_id),
            organiser: tables.user_name(event.organiser_id),
        }))
    }

    async fn insert_event(&self, event: &NewEvent) -> Result<i32, StoreError> {
        let mut tables = self.tables.lock().await;
        let id = tables.next_event_id;
        tables.next_event_id += 1;
        tables.events.insert(
            id,
            Event {
                id,
                name: event.name.clone(),
                description: event.description.clone(),
                organiser_id: event.organiser_id,
                created_on: event.created_on,
                start_date: event.start_date,
                end_date: event.end_date,
                type_id: event.type_id,
            },
        );
        Ok(id)
    }

    async fn update_event(&self, id: i32, changes: &ValidatedEvent) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if let Some(event) = tables.events.get_mut(&id) {
            event.name = changes.name.clone();
            event.description = changes.description.clone();
            event.type_id = changes.type_id;
            event.start_date = changes.start_date;
            event.end_date = changes.end_date;
        }
        Ok(())
    }

    async fn add_participant(&self, event_id: i32, helper_id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .lock()
            .await
            .participants
            .insert((event_id, helper_id)))
    }

    async fn remove_participant(
        &self,
        event_id: i32,
        helper_id: Uuid,
    ) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .lock()
            .await
            .participants
            .remove(&(event_id, helper_id)))
    }
}
