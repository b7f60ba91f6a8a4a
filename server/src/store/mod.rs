use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Event, EventDescription, EventSummary, EventType, NewEvent, User, ValidatedEvent};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Persistence for types, events, participations and the users they refer to.
///
/// Every method is a single round trip. Writes that depend on a prior read
/// (`add_participant`, `remove_participant`) report whether they changed
/// anything so callers do not need a separate existence query.
#[async_trait]
pub trait EventStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn list_types(&self) -> Result<Vec<EventType>, StoreError>;

    /// Records the user's current display name.
    async fn upsert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn list_events(&self) -> Result<Vec<EventSummary>, StoreError>;

    async fn list_joined(&self, helper_id: Uuid) -> Result<Vec<EventSummary>, StoreError>;

    async fn find_event(&self, id: i32) -> Result<Option<Event>, StoreError>;

    async fn describe_event(&self, id: i32) -> Result<Option<EventDescription>, StoreError>;

    async fn insert_event(&self, event: &NewEvent) -> Result<i32, StoreError>;

    async fn update_event(&self, id: i32, changes: &ValidatedEvent) -> Result<(), StoreError>;

    /// Returns `false` when the user already participates.
    async fn add_participant(&self, event_id: i32, helper_id: Uuid) -> Result<bool, StoreError>;

    /// Returns `false` when there was no participation to remove.
    async fn remove_participant(&self, event_id: i32, helper_id: Uuid)
        -> Result<bool, StoreError>;
}
