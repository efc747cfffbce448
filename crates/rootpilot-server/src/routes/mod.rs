//! API routes and the ownership guard they share.

pub mod action_items;
pub mod analysis;
pub mod auth;
pub mod incidents;
pub mod projects;
pub mod user;

use axum::Json;
use rootpilot_auth::Identity;
use rootpilot_core::error::RootPilotError;
use rootpilot_core::models::action_item::ActionItem;
use rootpilot_core::models::incident::Incident;
use rootpilot_core::models::project::AnalysisProject;
use rootpilot_core::repository::{
    ActionItemRepository, IncidentRepository, ProjectRepository, RcaResultRepository,
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `{message}` body for operations with nothing else to return.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Fail unless `caller` owns the entity.
///
/// With `conceal_foreign_resources` set the failure is the entity's
/// NotFound, otherwise "Access denied".
fn ensure_owner(
    state: &AppState,
    caller: &Identity,
    owner: Uuid,
    entity: &str,
    id: Uuid,
) -> ApiResult<()> {
    if owner == caller.user_id {
        return Ok(());
    }
    warn!(caller = %caller.user_id, entity, %id, "Ownership check failed");
    if state.config.conceal_foreign_resources {
        Err(RootPilotError::not_found(entity, id).into())
    } else {
        Err(RootPilotError::denied(format!("{entity} {id} is owned by another user")).into())
    }
}

pub(crate) async fn owned_project(
    state: &AppState,
    caller: &Identity,
    id: Uuid,
) -> ApiResult<AnalysisProject> {
    let project = state.projects.get_by_id(id).await?;
    ensure_owner(state, caller, project.user_id, "Project", id)?;
    Ok(project)
}

pub(crate) async fn owned_incident(
    state: &AppState,
    caller: &Identity,
    id: Uuid,
) -> ApiResult<Incident> {
    let incident = state.incidents.get_by_id(id).await?;
    ensure_owner(state, caller, incident.user_id, "Incident", id)?;
    Ok(incident)
}

/// Walk ActionItem → RcaResult → Incident and check the caller owns
/// the incident. A dangling link anywhere in the chain is treated as
/// an ownership failure.
pub(crate) async fn owned_action_item(
    state: &AppState,
    caller: &Identity,
    id: Uuid,
) -> ApiResult<ActionItem> {
    let item = state.action_items.get_by_id(id).await?;

    let owner = match state.rca_results.get_by_id(item.rca_result_id).await {
        Ok(result) => match state.incidents.get_by_id(result.incident_id).await {
            Ok(incident) => Some(incident.user_id),
            Err(RootPilotError::NotFound { .. }) => None,
            Err(e) => return Err(e.into()),
        },
        Err(RootPilotError::NotFound { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    match owner {
        Some(owner) => {
            ensure_owner(state, caller, owner, "Action item", id)?;
            Ok(item)
        }
        None => {
            warn!(action_item_id = %id, "Action item ownership chain is broken");
            if state.config.conceal_foreign_resources {
                Err(RootPilotError::not_found("Action item", id).into())
            } else {
                Err(ApiError::from(RootPilotError::denied("ownership chain is broken")))
            }
        }
    }
}
