//! Action item read and status updates.

use axum::Json;
use axum::extract::{Path, State};
use rootpilot_core::models::action_item::{ActionItem, ActionItemStatus, UpdateActionItem};
use rootpilot_core::repository::ActionItemRepository;
use serde::Deserialize;
use tracing::info;

use super::owned_action_item;
use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser, parse_id};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateActionItemRequest {
    pub status: ActionItemStatus,
}

pub async fn get_action_item(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ActionItem>> {
    let id = parse_id(&id, "Action item")?;
    Ok(Json(owned_action_item(&state, &caller, id).await?))
}

/// Setting the status it already has is a no-op apart from `updatedAt`.
pub async fn update_action_item(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateActionItemRequest>,
) -> ApiResult<Json<ActionItem>> {
    let id = parse_id(&id, "Action item")?;
    owned_action_item(&state, &caller, id).await?;

    let item = state
        .action_items
        .update(
            id,
            UpdateActionItem {
                status: Some(body.status),
            },
        )
        .await?;
    info!(action_item_id = %id, status = ?item.status, "Action item updated");
    Ok(Json(item))
}
