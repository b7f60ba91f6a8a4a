use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use uuid::Uuid;

use crate::models::User;
use crate::utils::error::AppError;

/// Set by the authenticating proxy in front of the server.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Width of `users.user_name`; longer names are cut to fit.
pub const USER_NAME_MAX_LENGTH: usize = 256;

/// The authenticated caller. Extracting it rejects anonymous requests with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
}

impl CurrentUser {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let id = headers
            .get(USER_ID_HEADER)?
            .to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value.trim()).ok())?;

        let name = headers
            .get(USER_NAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| value.chars().take(USER_NAME_MAX_LENGTH).collect::<String>())
            .unwrap_or_else(|| id.to_string());

        Some(Self { id, name })
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            user_name: self.name.clone(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
            .ok_or_else(|| AppError::AuthError("Missing or invalid user identity".to_string()))
    }
}
