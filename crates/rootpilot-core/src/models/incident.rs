//! Incident domain model.
//!
//! The contextual sections gathered by the intake form (system data,
//! maintenance history, operator factors, ...) are kept as opaque JSON
//! objects; nothing server-side interprets them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    #[default]
    Draft,
    Pending,
    Analyzing,
    Completed,
}

impl IncidentStatus {
    /// Whether an incident in this status may be handed to the
    /// analysis engine.
    pub fn can_start_analysis(self) -> bool {
        matches!(self, Self::Draft | Self::Pending)
    }

    /// Statuses a client may set directly; the rest are driven by the
    /// analysis flow.
    pub fn is_client_settable(self) -> bool {
        matches!(self, Self::Draft | Self::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Analyzing => "analyzing",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub incident_date: DateTime<Utc>,
    pub location: Option<String>,
    pub affected_assets: Option<Vec<String>>,
    pub system_data: Option<serde_json::Value>,
    pub maintenance_history: Option<serde_json::Value>,
    pub operator_factors: Option<serde_json::Value>,
    pub environmental_factors: Option<serde_json::Value>,
    pub process_context: Option<serde_json::Value>,
    pub risk_compliance: Option<serde_json::Value>,
    pub attachments: Option<serde_json::Value>,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct IncidentContext {
    pub location: Option<String>,
    pub affected_assets: Option<Vec<String>>,
    pub system_data: Option<serde_json::Value>,
    pub maintenance_history: Option<serde_json::Value>,
    pub operator_factors: Option<serde_json::Value>,
    pub environmental_factors: Option<serde_json::Value>,
    pub process_context: Option<serde_json::Value>,
    pub risk_compliance: Option<serde_json::Value>,
    pub attachments: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct CreateIncident {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub incident_date: DateTime<Utc>,
    pub context: IncidentContext,
    pub status: IncidentStatus,
}

/// Partial update; `None` leaves a field untouched. Context fields
/// replace the stored value wholesale when present.
#[derive(Debug, Clone, Default)]
pub struct UpdateIncident {
    pub title: Option<String>,
    pub description: Option<String>,
    pub incident_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub affected_assets: Option<Vec<String>>,
    pub system_data: Option<serde_json::Value>,
    pub maintenance_history: Option<serde_json::Value>,
    pub operator_factors: Option<serde_json::Value>,
    pub environmental_factors: Option<serde_json::Value>,
    pub process_context: Option<serde_json::Value>,
    pub risk_compliance: Option<serde_json::Value>,
    pub attachments: Option<serde_json::Value>,
    pub status: Option<IncidentStatus>,
}
