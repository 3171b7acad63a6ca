use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored credential row. The hash never leaves the process; responses go
/// through [`LoginResponse`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Login {
    pub username: String,
    pub user_id: Uuid,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLoginRequest {
    pub username: String,
    pub user_id: Uuid,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLoginRequest {
    pub user_id: Option<Uuid>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Login> for LoginResponse {
    fn from(login: Login) -> Self {
        Self {
            username: login.username,
            user_id: login.user_id,
            created_at: login.created_at,
            updated_at: login.updated_at,
        }
    }
}
