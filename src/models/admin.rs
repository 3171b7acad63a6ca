use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub admin_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAdminRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAdminQuery {
    #[serde(default)]
    pub cascade: bool,
}
