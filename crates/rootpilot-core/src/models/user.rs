//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2id PHC string; never sent to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    /// Already hashed by the auth layer.
    pub password_hash: String,
    pub name: String,
    pub company: Option<String>,
    pub role: Option<String>,
}

/// Profile fields a user may change about themselves. Email and
/// password are deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
}
