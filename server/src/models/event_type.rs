use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category label applied to an event. Rows live in the `types` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventType {
    pub id: i32,
    pub name: String,
}
