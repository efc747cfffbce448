//! The analysis engine capability and the payloads it produces.

use chrono::{DateTime, Utc};
use rootpilot_core::models::incident::Incident;
use rootpilot_core::models::project::AnalysisProject;
use rootpilot_core::models::rca_result::{
    CausalChain, RecommendedAction, RiskInsights, RootCause, SupportingDocument,
};
use serde::{Deserialize, Serialize};

/// Findings for one incident. Each recommended action becomes a
/// persisted action item.
#[derive(Debug, Clone)]
pub struct IncidentAnalysis {
    pub root_causes: Vec<RootCause>,
    pub causal_chain: CausalChain,
    pub recommended_actions: Vec<RecommendedAction>,
    pub supporting_documents: Vec<SupportingDocument>,
    pub risk_insights: RiskInsights,
    /// 0–100 inclusive.
    pub confidence_rating: u8,
    /// Free-form engine provenance stored with the result.
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_data_points: u32,
    pub identified_issues: u32,
    /// Fraction in `[0, 1]`, two decimal places.
    pub confidence_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectRootCause {
    pub id: String,
    pub description: String,
    pub probability: f64,
    pub impact: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesPoint {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub value: f64,
    pub anomaly: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u32,
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub time_series_data: Vec<TimeSeriesPoint>,
    pub category_data: Vec<CategoryCount>,
}

/// Findings for a data-file analysis project; stored verbatim as the
/// project's `analysisResults`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub analysis_type: String,
    pub timestamp: DateTime<Utc>,
    pub summary: AnalysisSummary,
    pub root_causes: Vec<ProjectRootCause>,
    pub recommendations: Vec<String>,
    pub chart_data: ChartData,
}

/// Something that turns an incident or project into findings.
///
/// Implementations must not fail: any lookup or authorization problem
/// is resolved before the engine is called.
pub trait AnalysisEngine: Send + Sync {
    /// Short identifier recorded with every result.
    fn name(&self) -> &str;

    fn analyze_incident(&self, incident: &Incident) -> IncidentAnalysis;

    fn analyze_project(&self, project: &AnalysisProject, analysis_type: &str) -> ProjectAnalysis;
}
