//! Root-cause analysis result domain model.
//!
//! One result exists per analyzed incident. The store rejects a second
//! result for the same `incident_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::action_item::Priority;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Bucket a probability in `[0, 1]`.
    pub fn from_probability(p: f64) -> Self {
        if p >= 0.75 {
            Self::High
        } else if p >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RootCause {
    pub id: String,
    pub description: String,
    pub category: String,
    pub probability: f64,
    pub confidence: ConfidenceLevel,
    pub evidence_indicators: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimelineEventKind {
    Trigger,
    Failure,
    Cascade,
    Outcome,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEvent {
    pub time: DateTime<Utc>,
    pub event: String,
    #[serde(rename = "type")]
    pub kind: TimelineEventKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CausalChain {
    /// Chronologically ordered.
    pub timeline: Vec<TimelineEvent>,
    pub pathway: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedAction {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub responsible_team: String,
    pub suggested_deadline: Option<String>,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupportingDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarIncident {
    pub date: String,
    pub description: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RiskInsights {
    pub similar_incidents: Vec<SimilarIncident>,
    pub trends: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RcaResult {
    pub id: Uuid,
    pub incident_id: Uuid,
    pub primary_root_causes: Vec<RootCause>,
    pub causal_chain: CausalChain,
    pub recommended_actions: Vec<RecommendedAction>,
    pub supporting_documents: Option<Vec<SupportingDocument>>,
    pub risk_insights: Option<RiskInsights>,
    /// 0–100 inclusive.
    pub confidence_rating: u8,
    pub ai_analysis_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateRcaResult {
    pub incident_id: Uuid,
    pub primary_root_causes: Vec<RootCause>,
    pub causal_chain: CausalChain,
    pub recommended_actions: Vec<RecommendedAction>,
    pub supporting_documents: Option<Vec<SupportingDocument>>,
    pub risk_insights: Option<RiskInsights>,
    pub confidence_rating: u8,
    pub ai_analysis_data: Option<serde_json::Value>,
}

/// The only fields of a result that may change after creation.
#[derive(Debug, Clone, Default)]
pub struct UpdateRcaResult {
    pub supporting_documents: Option<Vec<SupportingDocument>>,
    pub risk_insights: Option<RiskInsights>,
    pub confidence_rating: Option<u8>,
}
