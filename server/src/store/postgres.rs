use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use super::{EventStore, StoreError};
use crate::models::{Event, EventDescription, EventSummary, EventType, NewEvent, User, ValidatedEvent};

const SUMMARY_COLUMNS: &str = r#"
    e.id, e.name, e.start_date, t.name AS type_name, u.user_name AS organiser
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool and brings the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        tracing::info!(max_connections, "Successfully connected to database");

        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Migrations run successfully");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl EventStore for PgStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn list_types(&self) -> Result<Vec<EventType>, StoreError> {
        let types = sqlx::query_as::<_, EventType>("SELECT id, name FROM types ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(types)
    }

    async fn upsert_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, user_name) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET user_name = EXCLUDED.user_name
            "#,
        )
        .bind(user.id)
        .bind(&user.user_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_events(&self) -> Result<Vec<EventSummary>, StoreError> {
        let sql = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM events e
            JOIN types t ON t.id = e.type_id
            JOIN users u ON u.id = e.organiser_id
            ORDER BY e.id
            "#
        );
        let events = sqlx::query_as::<_, EventSummary>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn list_joined(&self, helper_id: Uuid) -> Result<Vec<EventSummary>, StoreError> {
        let sql = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM events_participants p
            JOIN events e ON e.id = p.event_id
            JOIN types t ON t.id = e.type_id
            JOIN users u ON u.id = e.organiser_id
            WHERE p.helper_id = $1
            ORDER BY e.id
            "#
        );
        let events = sqlx::query_as::<_, EventSummary>(&sql)
            .bind(helper_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn find_event(&self, id: i32) -> Result<Option<Event>, StoreError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, description, organiser_id, created_on, start_date, end_date, type_id
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    async fn describe_event(&self, id: i32) -> Result<Option<EventDescription>, StoreError> {
        let event = sqlx::query_as::<_, EventDescription>(
            r#"
            SELECT e.id, e.name, e.description, e.created_on, e.start_date, e.end_date,
                   t.name AS type_name, u.user_name AS organiser
            FROM events e
            JOIN types t ON t.id = e.type_id
            JOIN users u ON u.id = e.organiser_id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    async fn insert_event(&self, event: &NewEvent) -> Result<i32, StoreError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO events
                (name, description, organiser_id, created_on, start_date, end_date, type_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.organiser_id)
        .bind(event.created_on)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.type_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_event(&self, id: i32, changes: &ValidatedEvent) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE events
            SET name = $2, description = $3, type_id = $4, start_date = $5, end_date = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.type_id)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn add_participant(&self, event_id: i32, helper_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO events_participants (event_id, helper_id) VALUES ($1, $2)
            ON CONFLICT (event_id, helper_id) DO NOTHING
            "#,
        )
        .bind(event_id)
        .bind(helper_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn remove_participant(
        &self,
        event_id: i32,
        helper_id: Uuid,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM events_participants WHERE event_id = $1 AND helper_id = $2")
                .bind(event_id)
                .bind(helper_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() == 1)
    }
}
