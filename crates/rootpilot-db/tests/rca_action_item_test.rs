//! Integration tests for the RCA result and Action item repositories.

use chrono::Utc;
use rootpilot_core::error::RootPilotError;
use rootpilot_core::models::action_item::{
    ActionItemStatus, CreateActionItem, Priority, UpdateActionItem,
};
use rootpilot_core::models::rca_result::{CausalChain, CreateRcaResult, UpdateRcaResult};
use rootpilot_core::repository::{ActionItemRepository, RcaResultRepository};
use rootpilot_db::MemStore;
use rootpilot_db::repository::{MemActionItemRepository, MemRcaResultRepository};
use uuid::Uuid;

fn rca_for(incident_id: Uuid) -> CreateRcaResult {
    CreateRcaResult {
        incident_id,
        primary_root_causes: Vec::new(),
        causal_chain: CausalChain {
            timeline: Vec::new(),
            pathway: "seal wear -> leak -> trip".into(),
        },
        recommended_actions: Vec::new(),
        supporting_documents: None,
        risk_insights: None,
        confidence_rating: 82,
        ai_analysis_data: None,
    }
}

fn item(rca_result_id: Uuid, title: &str) -> CreateActionItem {
    CreateActionItem {
        rca_result_id,
        title: title.into(),
        description: None,
        priority: Priority::High,
        responsible_team: "Maintenance".into(),
        suggested_deadline: None,
    }
}

#[tokio::test]
async fn one_result_per_incident() {
    let store = MemStore::new();
    let repo = MemRcaResultRepository::new(store.clone());
    let incident_id = Uuid::new_v4();

    let first = repo.create(rca_for(incident_id)).await.unwrap();
    assert_eq!(first.incident_id, incident_id);

    let err = repo.create(rca_for(incident_id)).await.unwrap_err();
    assert!(matches!(err, RootPilotError::AlreadyExists { .. }));
    assert_eq!(store.stats().rca_results, 1);

    let fetched = repo.get_by_incident(incident_id).await.unwrap();
    assert_eq!(fetched.id, first.id);
}

#[tokio::test]
async fn deleted_result_frees_the_incident_slot() {
    let repo = MemRcaResultRepository::new(MemStore::new());
    let incident_id = Uuid::new_v4();

    let first = repo.create(rca_for(incident_id)).await.unwrap();
    assert!(repo.delete(first.id).await.unwrap());
    assert!(!repo.delete(first.id).await.unwrap());

    let second = repo.create(rca_for(incident_id)).await.unwrap();
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn result_lookup_by_unknown_incident_is_not_found() {
    let repo = MemRcaResultRepository::new(MemStore::new());
    let err = repo.get_by_incident(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RootPilotError::NotFound { .. }));
}

#[tokio::test]
async fn targeted_result_update_clamps_confidence() {
    let repo = MemRcaResultRepository::new(MemStore::new());
    let created = repo.create(rca_for(Uuid::new_v4())).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateRcaResult {
                confidence_rating: Some(250),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.confidence_rating, 100);
    assert_eq!(updated.causal_chain, created.causal_chain);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn action_items_listed_per_result() {
    let repo = MemActionItemRepository::new(MemStore::new());
    let rca_a = Uuid::new_v4();
    let rca_b = Uuid::new_v4();

    repo.create(item(rca_a, "Replace seal")).await.unwrap();
    repo.create(item(rca_b, "Other")).await.unwrap();
    repo.create(item(rca_a, "Retrain operators")).await.unwrap();

    let items = repo.list_by_rca_result(rca_a).await.unwrap();
    let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Replace seal", "Retrain operators"]);
    assert!(items.iter().all(|i| i.status == ActionItemStatus::Pending));
}

#[tokio::test]
async fn completing_an_action_item_is_idempotent() {
    let repo = MemActionItemRepository::new(MemStore::new());
    let created = repo.create(item(Uuid::new_v4(), "Replace seal")).await.unwrap();

    let done = UpdateActionItem {
        status: Some(ActionItemStatus::Completed),
    };
    let first = repo.update(created.id, done.clone()).await.unwrap();
    let second = repo.update(created.id, done).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.status, ActionItemStatus::Completed);
    assert_eq!(second.status, ActionItemStatus::Completed);
    assert!(second.updated_at <= Utc::now());
}

#[tokio::test]
async fn delete_action_item_reports_existence() {
    let store = MemStore::new();
    let items = MemActionItemRepository::new(store.clone());
    let created = items.create(item(Uuid::new_v4(), "Orphan")).await.unwrap();

    assert!(items.delete(created.id).await.unwrap());
    assert!(!items.delete(created.id).await.unwrap());
    assert_eq!(store.stats().action_items, 0);
}
