//! The caller's own profile.

use axum::Json;
use axum::extract::State;
use rootpilot_core::error::RootPilotError;
use rootpilot_core::models::user::{UpdateUser, User};
use rootpilot_core::repository::UserRepository;
use tracing::info;

use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<User>> {
    let user = state.users.get_by_id(caller.user_id).await?;
    Ok(Json(user))
}

/// Only name, company and role are accepted; anything else in the body
/// is ignored.
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiJson(body): ApiJson<UpdateUser>,
) -> ApiResult<Json<User>> {
    if body.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(RootPilotError::validation("name must not be empty").into());
    }
    let user = state.users.update(caller.user_id, body).await?;
    info!(user_id = %user.id, "Profile updated");
    Ok(Json(user))
}
