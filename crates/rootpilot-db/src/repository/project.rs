//! In-memory implementation of [`ProjectRepository`].

use chrono::Utc;
use rootpilot_core::error::RootPilotResult;
use rootpilot_core::models::project::{AnalysisProject, CreateProject, UpdateProject};
use rootpilot_core::repository::ProjectRepository;
use uuid::Uuid;

use crate::error::DbError;
use crate::store::MemStore;

const ENTITY: &str = "Project";

#[derive(Clone)]
pub struct MemProjectRepository {
    store: MemStore,
}

impl MemProjectRepository {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

impl ProjectRepository for MemProjectRepository {
    async fn create(&self, input: CreateProject) -> RootPilotResult<AnalysisProject> {
        let now = Utc::now();
        let project = self
            .store
            .tables()
            .projects
            .insert(|id| AnalysisProject {
                id,
                user_id: input.user_id,
                title: input.title,
                description: input.description,
                status: input.status,
                data_file_url: input.data_file_url,
                analysis_results: None,
                created_at: now,
                updated_at: now,
            });
        Ok(project)
    }

    async fn get_by_id(&self, id: Uuid) -> RootPilotResult<AnalysisProject> {
        let project = self
            .store
            .tables()
            .projects
            .get(id)
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        Ok(project)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> RootPilotResult<Vec<AnalysisProject>> {
        Ok(self
            .store
            .tables()
            .projects
            .filter(|p| p.user_id == user_id))
    }

    async fn update(&self, id: Uuid, input: UpdateProject) -> RootPilotResult<AnalysisProject> {
        let project = self
            .store
            .tables()
            .projects
            .modify(id, |project| {
                if let Some(title) = input.title {
                    project.title = title;
                }
                if let Some(description) = input.description {
                    project.description = Some(description);
                }
                if let Some(status) = input.status {
                    project.status = status;
                }
                if let Some(url) = input.data_file_url {
                    project.data_file_url = Some(url);
                }
                if let Some(results) = input.analysis_results {
                    project.analysis_results = Some(results);
                }
                project.updated_at = Utc::now();
            })
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        Ok(project)
    }

    async fn delete(&self, id: Uuid) -> RootPilotResult<bool> {
        Ok(self.store.tables().projects.remove(id))
    }
}
