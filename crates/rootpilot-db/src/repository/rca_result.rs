//! In-memory implementation of [`RcaResultRepository`].
//!
//! At most one result may exist per incident; a second `create` for
//! the same `incident_id` is rejected inside the write lock.

use chrono::Utc;
use rootpilot_core::error::RootPilotResult;
use rootpilot_core::models::rca_result::{CreateRcaResult, RcaResult, UpdateRcaResult};
use rootpilot_core::repository::RcaResultRepository;
use uuid::Uuid;

use crate::error::DbError;
use crate::store::MemStore;

const ENTITY: &str = "RCA result";

#[derive(Clone)]
pub struct MemRcaResultRepository {
    store: MemStore,
}

impl MemRcaResultRepository {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

impl RcaResultRepository for MemRcaResultRepository {
    async fn create(&self, input: CreateRcaResult) -> RootPilotResult<RcaResult> {
        let incident_id = input.incident_id;
        let result = self
            .store
            .tables()
            .rca_results
            .insert_new(
                |existing| existing.incident_id == incident_id,
                |id| RcaResult {
                    id,
                    incident_id,
                    primary_root_causes: input.primary_root_causes,
                    causal_chain: input.causal_chain,
                    recommended_actions: input.recommended_actions,
                    supporting_documents: input.supporting_documents,
                    risk_insights: input.risk_insights,
                    confidence_rating: input.confidence_rating.min(100),
                    ai_analysis_data: input.ai_analysis_data,
                    created_at: Utc::now(),
                },
            )
            .ok_or(DbError::UniqueViolation {
                entity: ENTITY,
                field: "incident_id",
            })?;
        Ok(result)
    }

    async fn get_by_id(&self, id: Uuid) -> RootPilotResult<RcaResult> {
        let result = self
            .store
            .tables()
            .rca_results
            .get(id)
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        Ok(result)
    }

    async fn get_by_incident(&self, incident_id: Uuid) -> RootPilotResult<RcaResult> {
        let result = self
            .store
            .tables()
            .rca_results
            .find(|r| r.incident_id == incident_id)
            .ok_or_else(|| DbError::NotFound {
                entity: ENTITY,
                id: format!("incident_id={incident_id}"),
            })?;
        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateRcaResult) -> RootPilotResult<RcaResult> {
        let result = self
            .store
            .tables()
            .rca_results
            .modify(id, |result| {
                if let Some(docs) = input.supporting_documents {
                    result.supporting_documents = Some(docs);
                }
                if let Some(insights) = input.risk_insights {
                    result.risk_insights = Some(insights);
                }
                if let Some(rating) = input.confidence_rating {
                    result.confidence_rating = rating.min(100);
                }
            })
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        Ok(result)
    }

    async fn delete(&self, id: Uuid) -> RootPilotResult<bool> {
        Ok(self.store.tables().rca_results.remove(id))
    }
}
