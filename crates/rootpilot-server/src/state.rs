//! Shared application state handed to every handler.

use std::sync::Arc;

use rootpilot_analysis::{AnalysisEngine, AnalysisService, MockAnalysisEngine};
use rootpilot_auth::AuthService;
use rootpilot_db::MemStore;
use rootpilot_db::repository::{
    MemActionItemRepository, MemIncidentRepository, MemProjectRepository, MemRcaResultRepository,
    MemUserRepository,
};

use crate::config::ServerConfig;

pub type Analysis = AnalysisService<
    MemIncidentRepository,
    MemProjectRepository,
    MemRcaResultRepository,
    MemActionItemRepository,
>;

#[derive(Clone)]
pub struct AppState {
    pub users: MemUserRepository,
    pub projects: MemProjectRepository,
    pub incidents: MemIncidentRepository,
    pub rca_results: MemRcaResultRepository,
    pub action_items: MemActionItemRepository,
    pub auth: Arc<AuthService<MemUserRepository>>,
    pub analysis: Arc<Analysis>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by `store` using the templated analysis engine.
    pub fn new(store: MemStore, config: ServerConfig) -> Self {
        Self::with_engine(store, config, Arc::new(MockAnalysisEngine::new()))
    }

    pub fn with_engine(
        store: MemStore,
        config: ServerConfig,
        engine: Arc<dyn AnalysisEngine>,
    ) -> Self {
        let users = MemUserRepository::new(store.clone());
        let projects = MemProjectRepository::new(store.clone());
        let incidents = MemIncidentRepository::new(store.clone());
        let rca_results = MemRcaResultRepository::new(store.clone());
        let action_items = MemActionItemRepository::new(store);

        let auth = AuthService::new(users.clone(), config.auth.clone());
        let analysis = AnalysisService::new(
            incidents.clone(),
            projects.clone(),
            rca_results.clone(),
            action_items.clone(),
            engine,
        );

        Self {
            users,
            projects,
            incidents,
            rca_results,
            action_items,
            auth: Arc::new(auth),
            analysis: Arc::new(analysis),
            config: Arc::new(config),
        }
    }
}
