//! Integration tests for the in-memory User repository.

use rootpilot_core::error::RootPilotError;
use rootpilot_core::models::user::{CreateUser, UpdateUser};
use rootpilot_core::repository::UserRepository;
use rootpilot_db::MemStore;
use rootpilot_db::repository::MemUserRepository;
use uuid::Uuid;

fn alice() -> CreateUser {
    CreateUser {
        email: "alice@example.com".into(),
        password_hash: "$argon2id$placeholder".into(),
        name: "Alice".into(),
        company: None,
        role: None,
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let repo = MemUserRepository::new(MemStore::new());

    let user = repo.create(alice()).await.unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.name, "Alice");
    assert_eq!(user.created_at, user.updated_at);

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);

    let by_email = repo.get_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn email_lookup_ignores_case() {
    let repo = MemUserRepository::new(MemStore::new());
    let user = repo.create(alice()).await.unwrap();

    let fetched = repo.get_by_email("ALICE@Example.com").await.unwrap();
    assert_eq!(fetched.id, user.id);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let store = MemStore::new();
    let repo = MemUserRepository::new(store.clone());
    repo.create(alice()).await.unwrap();

    let err = repo
        .create(CreateUser {
            email: "Alice@example.com".into(),
            ..alice()
        })
        .await
        .unwrap_err();
    assert!(
        matches!(err, RootPilotError::AlreadyExists { .. }),
        "expected AlreadyExists, got: {err:?}"
    );
    assert_eq!(store.stats().users, 1);
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let repo = MemUserRepository::new(MemStore::new());

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RootPilotError::NotFound { .. }));

    let err = repo.get_by_email("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, RootPilotError::NotFound { .. }));

    let err = repo
        .update(Uuid::new_v4(), UpdateUser::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RootPilotError::NotFound { .. }));
}

#[tokio::test]
async fn update_profile_fields() {
    let repo = MemUserRepository::new(MemStore::new());
    let user = repo.create(alice()).await.unwrap();

    let updated = repo
        .update(
            user.id,
            UpdateUser {
                company: Some("Acme Chemicals".into()),
                role: Some("Reliability Engineer".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Alice");
    assert_eq!(updated.company.as_deref(), Some("Acme Chemicals"));
    assert_eq!(updated.role.as_deref(), Some("Reliability Engineer"));
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.password_hash, user.password_hash);
    assert!(updated.updated_at >= user.updated_at);
}

#[tokio::test]
async fn separate_stores_are_isolated() {
    let first = MemUserRepository::new(MemStore::new());
    let second = MemUserRepository::new(MemStore::new());

    first.create(alice()).await.unwrap();
    second.create(alice()).await.unwrap();
    assert!(second.get_by_email("alice@example.com").await.is_ok());
}
