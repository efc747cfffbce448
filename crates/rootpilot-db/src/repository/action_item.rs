//! In-memory implementation of [`ActionItemRepository`].

use chrono::Utc;
use rootpilot_core::error::RootPilotResult;
use rootpilot_core::models::action_item::{
    ActionItem, ActionItemStatus, CreateActionItem, UpdateActionItem,
};
use rootpilot_core::repository::ActionItemRepository;
use uuid::Uuid;

use crate::error::DbError;
use crate::store::MemStore;

const ENTITY: &str = "Action item";

#[derive(Clone)]
pub struct MemActionItemRepository {
    store: MemStore,
}

impl MemActionItemRepository {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

impl ActionItemRepository for MemActionItemRepository {
    async fn create(&self, input: CreateActionItem) -> RootPilotResult<ActionItem> {
        let now = Utc::now();
        let item = self.store.tables().action_items.insert(|id| ActionItem {
            id,
            rca_result_id: input.rca_result_id,
            title: input.title,
            description: input.description,
            priority: input.priority,
            responsible_team: input.responsible_team,
            suggested_deadline: input.suggested_deadline,
            status: ActionItemStatus::Pending,
            created_at: now,
            updated_at: now,
        });
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> RootPilotResult<ActionItem> {
        let item = self
            .store
            .tables()
            .action_items
            .get(id)
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        Ok(item)
    }

    async fn list_by_rca_result(&self, rca_result_id: Uuid) -> RootPilotResult<Vec<ActionItem>> {
        Ok(self
            .store
            .tables()
            .action_items
            .filter(|a| a.rca_result_id == rca_result_id))
    }

    async fn update(&self, id: Uuid, input: UpdateActionItem) -> RootPilotResult<ActionItem> {
        let item = self
            .store
            .tables()
            .action_items
            .modify(id, |item| {
                if let Some(status) = input.status {
                    item.status = status;
                }
                item.updated_at = Utc::now();
            })
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> RootPilotResult<bool> {
        Ok(self.store.tables().action_items.remove(id))
    }
}
