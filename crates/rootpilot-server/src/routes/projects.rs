//! Analysis project CRUD, scoped to the caller.

use axum::Json;
use axum::extract::{Path, State};
use rootpilot_core::error::RootPilotError;
use rootpilot_core::models::project::{
    AnalysisProject, CreateProject, ProjectStatus, UpdateProject,
};
use rootpilot_core::repository::ProjectRepository;
use serde::Deserialize;
use tracing::info;

use super::{MessageResponse, owned_project};
use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser, parse_id};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    pub data_file_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub data_file_url: Option<String>,
}

fn check_title(title: &str) -> ApiResult<()> {
    if title.trim().is_empty() {
        return Err(RootPilotError::validation("title is required").into());
    }
    Ok(())
}

pub async fn list_projects(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<Vec<AnalysisProject>>> {
    Ok(Json(state.projects.list_by_owner(caller.user_id).await?))
}

pub async fn create_project(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiJson(body): ApiJson<CreateProjectRequest>,
) -> ApiResult<Json<AnalysisProject>> {
    check_title(&body.title)?;
    let project = state
        .projects
        .create(CreateProject {
            user_id: caller.user_id,
            title: body.title.trim().to_string(),
            description: body.description,
            status: body.status,
            data_file_url: body.data_file_url,
        })
        .await?;
    info!(project_id = %project.id, user_id = %caller.user_id, "Project created");
    Ok(Json(project))
}

pub async fn get_project(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<AnalysisProject>> {
    let id = parse_id(&id, "Project")?;
    Ok(Json(owned_project(&state, &caller, id).await?))
}

pub async fn update_project(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateProjectRequest>,
) -> ApiResult<Json<AnalysisProject>> {
    let id = parse_id(&id, "Project")?;
    owned_project(&state, &caller, id).await?;
    if let Some(title) = &body.title {
        check_title(title)?;
    }

    let project = state
        .projects
        .update(
            id,
            UpdateProject {
                title: body.title.map(|t| t.trim().to_string()),
                description: body.description,
                status: body.status,
                data_file_url: body.data_file_url,
                analysis_results: None,
            },
        )
        .await?;
    info!(project_id = %id, "Project updated");
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, "Project")?;
    owned_project(&state, &caller, id).await?;

    // Gone between the check and the delete.
    if !state.projects.delete(id).await? {
        return Err(RootPilotError::not_found("Project", id).into());
    }
    info!(project_id = %id, user_id = %caller.user_id, "Project deleted");
    Ok(Json(MessageResponse {
        message: "Project deleted successfully".into(),
    }))
}
