//! Analysis orchestration: moves incidents and projects through an
//! analysis run and persists what the engine returns.
//!
//! Callers are expected to have resolved the entity and checked that
//! the requester owns it; this layer only enforces state rules.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rootpilot_core::error::{RootPilotError, RootPilotResult};
use rootpilot_core::models::action_item::{ActionItem, CreateActionItem};
use rootpilot_core::models::incident::{Incident, IncidentStatus};
use rootpilot_core::models::project::{AnalysisProject, ProjectStatus, UpdateProject};
use rootpilot_core::models::rca_result::{CreateRcaResult, RcaResult};
use rootpilot_core::repository::{
    ActionItemRepository, IncidentRepository, ProjectRepository, RcaResultRepository,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::engine::{AnalysisEngine, ProjectAnalysis};

/// An RCA result together with its action items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RcaReport {
    pub rca_result: RcaResult,
    pub action_items: Vec<ActionItem>,
}

/// Analysis service.
///
/// Generic over the repositories it writes to; the engine is a trait
/// object so it can be swapped at runtime.
pub struct AnalysisService<I, P, R, A> {
    incidents: I,
    projects: P,
    results: R,
    items: A,
    engine: Arc<dyn AnalysisEngine>,
}

impl<I, P, R, A> AnalysisService<I, P, R, A>
where
    I: IncidentRepository,
    P: ProjectRepository,
    R: RcaResultRepository,
    A: ActionItemRepository,
{
    pub fn new(
        incidents: I,
        projects: P,
        results: R,
        items: A,
        engine: Arc<dyn AnalysisEngine>,
    ) -> Self {
        Self {
            incidents,
            projects,
            results,
            items,
            engine,
        }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Run root-cause analysis on an incident.
    ///
    /// Status goes draft/pending → analyzing → completed. Exactly one
    /// result is created, plus one action item per recommended action.
    /// The move to analyzing is conditional, so only one concurrent run
    /// proceeds. If the engine or persisting fails, partial writes are
    /// removed and the previous status is restored.
    pub async fn analyze_incident(&self, incident: Incident) -> RootPilotResult<RcaReport> {
        // 1. State checks.
        match incident.status {
            IncidentStatus::Analyzing => return Err(in_progress()),
            status if !status.can_start_analysis() => {
                return Err(RootPilotError::AlreadyExists {
                    entity: "RCA result".into(),
                });
            }
            _ => {}
        }
        match self.results.get_by_incident(incident.id).await {
            Ok(_) => {
                return Err(RootPilotError::AlreadyExists {
                    entity: "RCA result".into(),
                });
            }
            Err(RootPilotError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        // 2. Claim the incident.
        let previous = incident.status;
        let incident = self
            .incidents
            .transition_status(
                incident.id,
                &[IncidentStatus::Draft, IncidentStatus::Pending],
                IncidentStatus::Analyzing,
            )
            .await
            .map_err(|e| match e {
                RootPilotError::Conflict { .. } => in_progress(),
                other => other,
            })?;
        info!(
            incident_id = %incident.id,
            engine = self.engine.name(),
            "Incident analysis started"
        );

        // 3. Generate and persist.
        let report = match self.persist_incident_analysis(&incident).await {
            Ok(report) => report,
            Err(e) => {
                error!(
                    incident_id = %incident.id,
                    error = %e,
                    "Incident analysis failed; restoring status"
                );
                if let Err(restore) = self
                    .incidents
                    .transition_status(incident.id, &[IncidentStatus::Analyzing], previous)
                    .await
                {
                    error!(incident_id = %incident.id, error = %restore, "Status restore failed");
                }
                return Err(e);
            }
        };

        // 4. Mark as completed.
        self.incidents
            .transition_status(
                incident.id,
                &[IncidentStatus::Analyzing],
                IncidentStatus::Completed,
            )
            .await?;
        info!(
            incident_id = %incident.id,
            rca_result_id = %report.rca_result.id,
            action_items = report.action_items.len(),
            "Incident analysis completed"
        );

        Ok(report)
    }

    async fn persist_incident_analysis(&self, incident: &Incident) -> RootPilotResult<RcaReport> {
        let engine = &self.engine;
        let analysis = panic::catch_unwind(AssertUnwindSafe(|| engine.analyze_incident(incident)))
            .map_err(|_| RootPilotError::Internal("analysis engine panicked".into()))?;

        let rca_result = self
            .results
            .create(CreateRcaResult {
                incident_id: incident.id,
                primary_root_causes: analysis.root_causes,
                causal_chain: analysis.causal_chain,
                recommended_actions: analysis.recommended_actions.clone(),
                supporting_documents: Some(analysis.supporting_documents),
                risk_insights: Some(analysis.risk_insights),
                confidence_rating: analysis.confidence_rating.min(100),
                ai_analysis_data: Some(analysis.metadata),
            })
            .await?;

        let mut action_items = Vec::with_capacity(analysis.recommended_actions.len());
        for action in analysis.recommended_actions {
            let created = self
                .items
                .create(CreateActionItem {
                    rca_result_id: rca_result.id,
                    title: action.title,
                    description: Some(action.description),
                    priority: action.priority,
                    responsible_team: action.responsible_team,
                    suggested_deadline: action.suggested_deadline,
                })
                .await;
            match created {
                Ok(item) => action_items.push(item),
                Err(e) => {
                    self.discard(&rca_result, &action_items).await;
                    return Err(e);
                }
            }
        }

        Ok(RcaReport {
            rca_result,
            action_items,
        })
    }

    /// Best-effort removal of a half-written report.
    async fn discard(&self, rca_result: &RcaResult, action_items: &[ActionItem]) {
        for item in action_items {
            if let Err(e) = self.items.delete(item.id).await {
                warn!(action_item_id = %item.id, error = %e, "Failed to discard action item");
            }
        }
        if let Err(e) = self.results.delete(rca_result.id).await {
            warn!(rca_result_id = %rca_result.id, error = %e, "Failed to discard RCA result");
        }
    }

    /// Fetch the stored result for an incident and its action items.
    pub async fn report_for_incident(
        &self,
        incident_id: uuid::Uuid,
    ) -> RootPilotResult<RcaReport> {
        let rca_result = self.results.get_by_incident(incident_id).await?;
        let action_items = self.items.list_by_rca_result(rca_result.id).await?;
        Ok(RcaReport {
            rca_result,
            action_items,
        })
    }

    /// Run the data-file analysis for a project, store the payload on
    /// the project and mark it completed.
    pub async fn analyze_project(
        &self,
        project: AnalysisProject,
        analysis_type: &str,
    ) -> RootPilotResult<ProjectAnalysis> {
        let analysis = self.engine.analyze_project(&project, analysis_type);
        let payload = serde_json::to_value(&analysis)
            .map_err(|e| RootPilotError::Internal(format!("serialize analysis: {e}")))?;

        self.projects
            .update(
                project.id,
                UpdateProject {
                    status: Some(ProjectStatus::Completed),
                    analysis_results: Some(payload),
                    ..Default::default()
                },
            )
            .await?;
        info!(project_id = %project.id, analysis_type, "Project analysis completed");

        Ok(analysis)
    }
}

fn in_progress() -> RootPilotError {
    RootPilotError::Conflict {
        reason: "Analysis already in progress".into(),
    }
}
