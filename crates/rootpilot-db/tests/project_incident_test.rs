//! Integration tests for the Project and Incident repositories.

use chrono::{TimeZone, Utc};
use rootpilot_core::error::RootPilotError;
use rootpilot_core::models::incident::{
    CreateIncident, IncidentContext, IncidentStatus, UpdateIncident,
};
use rootpilot_core::models::project::{CreateProject, ProjectStatus, UpdateProject};
use rootpilot_core::repository::{IncidentRepository, ProjectRepository};
use rootpilot_db::MemStore;
use rootpilot_db::repository::{MemIncidentRepository, MemProjectRepository};
use uuid::Uuid;

fn project(user_id: Uuid, title: &str) -> CreateProject {
    CreateProject {
        user_id,
        title: title.into(),
        description: None,
        status: ProjectStatus::Active,
        data_file_url: None,
    }
}

fn incident(user_id: Uuid, title: &str) -> CreateIncident {
    CreateIncident {
        user_id,
        title: title.into(),
        description: "Unexpected pump trip at 14:02".into(),
        incident_date: Utc.with_ymd_and_hms(2024, 1, 15, 14, 2, 0).unwrap(),
        context: IncidentContext {
            location: Some("Unit 3".into()),
            affected_assets: Some(vec!["P-101".into()]),
            ..Default::default()
        },
        status: IncidentStatus::Draft,
    }
}

// -----------------------------------------------------------------------
// Projects
// -----------------------------------------------------------------------

#[tokio::test]
async fn list_projects_scoped_to_owner_in_insertion_order() {
    let repo = MemProjectRepository::new(MemStore::new());
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.create(project(alice, "first")).await.unwrap();
    repo.create(project(bob, "bob's")).await.unwrap();
    repo.create(project(alice, "second")).await.unwrap();

    let titles: Vec<_> = repo
        .list_by_owner(alice)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["first", "second"]);
    assert_eq!(repo.list_by_owner(bob).await.unwrap().len(), 1);
    assert!(repo.list_by_owner(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_project_merges_fields() {
    let repo = MemProjectRepository::new(MemStore::new());
    let created = repo.create(project(Uuid::new_v4(), "Line 2")).await.unwrap();
    assert!(created.analysis_results.is_none());

    let updated = repo
        .update(
            created.id,
            UpdateProject {
                status: Some(ProjectStatus::Completed),
                analysis_results: Some(serde_json::json!({"ok": true})),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Line 2");
    assert_eq!(updated.status, ProjectStatus::Completed);
    assert_eq!(updated.analysis_results, Some(serde_json::json!({"ok": true})));
    assert_eq!(updated.user_id, created.user_id);
}

#[tokio::test]
async fn delete_project_reports_existence() {
    let repo = MemProjectRepository::new(MemStore::new());
    let created = repo.create(project(Uuid::new_v4(), "temp")).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());

    let err = repo.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, RootPilotError::NotFound { .. }));
}

// -----------------------------------------------------------------------
// Incidents
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_incident() {
    let repo = MemIncidentRepository::new(MemStore::new());
    let owner = Uuid::new_v4();

    let created = repo.create(incident(owner, "Pump Trip")).await.unwrap();
    assert_eq!(created.user_id, owner);
    assert_eq!(created.status, IncidentStatus::Draft);
    assert_eq!(created.location.as_deref(), Some("Unit 3"));

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.title, "Pump Trip");
    assert_eq!(fetched.affected_assets, Some(vec!["P-101".to_string()]));
}

#[tokio::test]
async fn update_incident_status_only_touches_status() {
    let repo = MemIncidentRepository::new(MemStore::new());
    let created = repo
        .create(incident(Uuid::new_v4(), "Pump Trip"))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateIncident {
                status: Some(IncidentStatus::Analyzing),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, IncidentStatus::Analyzing);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.location, created.location);
    assert_eq!(updated.affected_assets, created.affected_assets);
}

#[tokio::test]
async fn delete_incident_and_missing_update() {
    let repo = MemIncidentRepository::new(MemStore::new());
    let created = repo
        .create(incident(Uuid::new_v4(), "Pump Trip"))
        .await
        .unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    let err = repo
        .update(created.id, UpdateIncident::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RootPilotError::NotFound { .. }));
}

#[tokio::test]
async fn transition_status_only_moves_from_expected_statuses() {
    use IncidentStatus::{Analyzing, Completed, Draft, Pending};

    let repo = MemIncidentRepository::new(MemStore::new());
    let created = repo
        .create(incident(Uuid::new_v4(), "Pump Trip"))
        .await
        .unwrap();

    let moved = repo
        .transition_status(created.id, &[Draft, Pending], Analyzing)
        .await
        .unwrap();
    assert_eq!(moved.status, Analyzing);

    let err = repo
        .transition_status(created.id, &[Draft, Pending], Analyzing)
        .await
        .unwrap_err();
    match err {
        RootPilotError::Conflict { reason } => assert_eq!(reason, "Incident status is analyzing"),
        other => panic!("expected Conflict, got {other:?}"),
    }

    repo.transition_status(created.id, &[Analyzing], Completed)
        .await
        .unwrap();
    assert_eq!(repo.get_by_id(created.id).await.unwrap().status, Completed);

    let missing = repo
        .transition_status(Uuid::new_v4(), &[Draft], Pending)
        .await
        .unwrap_err();
    assert!(matches!(missing, RootPilotError::NotFound { .. }));
}
