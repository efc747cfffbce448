//! RootPilot Server: the REST API over the store, auth and analysis
//! crates.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        // Auth
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        // Profile
        .route(
            "/api/user/profile",
            get(routes::user::get_profile).put(routes::user::update_profile),
        )
        // Projects
        .route(
            "/api/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route("/api/analyze", post(routes::analysis::analyze_project))
        // Incidents
        .route(
            "/api/incidents",
            get(routes::incidents::list_incidents).post(routes::incidents::create_incident),
        )
        .route(
            "/api/incidents/{id}",
            get(routes::incidents::get_incident)
                .put(routes::incidents::update_incident)
                .delete(routes::incidents::delete_incident),
        )
        .route(
            "/api/incidents/{id}/analyze",
            post(routes::analysis::analyze_incident),
        )
        .route("/api/incidents/{id}/rca", get(routes::analysis::get_rca))
        // Action items
        .route(
            "/api/action-items/{id}",
            get(routes::action_items::get_action_item)
                .put(routes::action_items::update_action_item),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
