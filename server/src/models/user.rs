use uuid::Uuid;

/// A user as last seen through the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
}
