//! Action item domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionItemStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Blocked,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: Uuid,
    pub rca_result_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub responsible_team: String,
    pub suggested_deadline: Option<String>,
    pub status: ActionItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateActionItem {
    pub rca_result_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub responsible_team: String,
    pub suggested_deadline: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateActionItem {
    pub status: Option<ActionItemStatus>,
}
