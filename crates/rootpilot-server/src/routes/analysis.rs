//! Project and incident analysis, and RCA retrieval.

use axum::Json;
use axum::extract::{Path, State};
use rootpilot_analysis::{ProjectAnalysis, RcaReport};
use rootpilot_core::error::RootPilotError;
use serde::{Deserialize, Serialize};

use super::{owned_incident, owned_project};
use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser, parse_id};
use crate::state::AppState;

const DEFAULT_ANALYSIS_TYPE: &str = "root_cause";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeProjectRequest {
    pub project_id: Option<String>,
    pub analysis_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeProjectResponse {
    pub success: bool,
    pub analysis_results: ProjectAnalysis,
    pub message: String,
}

pub async fn analyze_project(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiJson(body): ApiJson<AnalyzeProjectRequest>,
) -> ApiResult<Json<AnalyzeProjectResponse>> {
    let raw_id = body
        .project_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| RootPilotError::validation("Project ID is required"))?;
    let id = parse_id(raw_id.trim(), "Project")?;
    let project = owned_project(&state, &caller, id).await?;

    let analysis_type = body
        .analysis_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ANALYSIS_TYPE.to_string());
    let analysis_results = state
        .analysis
        .analyze_project(project, &analysis_type)
        .await?;

    Ok(Json(AnalyzeProjectResponse {
        success: true,
        analysis_results,
        message: "Analysis completed successfully".into(),
    }))
}

pub async fn analyze_incident(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<RcaReport>> {
    let id = parse_id(&id, "Incident")?;
    let incident = owned_incident(&state, &caller, id).await?;
    Ok(Json(state.analysis.analyze_incident(incident).await?))
}

/// Two hops: the incident must be the caller's before its result is
/// looked up.
pub async fn get_rca(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<RcaReport>> {
    let id = parse_id(&id, "Incident")?;
    owned_incident(&state, &caller, id).await?;
    Ok(Json(state.analysis.report_for_incident(id).await?))
}
