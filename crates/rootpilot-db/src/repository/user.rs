//! In-memory implementation of [`UserRepository`].
//!
//! Emails are compared case-insensitively and must be unique; the
//! uniqueness check and the insert happen under one write lock.

use chrono::Utc;
use rootpilot_core::error::RootPilotResult;
use rootpilot_core::models::user::{CreateUser, UpdateUser, User};
use rootpilot_core::repository::UserRepository;
use uuid::Uuid;

use crate::error::DbError;
use crate::store::MemStore;

const ENTITY: &str = "User";

#[derive(Clone)]
pub struct MemUserRepository {
    store: MemStore,
}

impl MemUserRepository {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

impl UserRepository for MemUserRepository {
    async fn create(&self, input: CreateUser) -> RootPilotResult<User> {
        let now = Utc::now();
        let email = input.email;

        let user = self
            .store
            .tables()
            .users
            .insert_new(
                |existing| existing.email.eq_ignore_ascii_case(&email),
                |id| User {
                    id,
                    email: email.clone(),
                    password_hash: input.password_hash,
                    name: input.name,
                    company: input.company,
                    role: input.role,
                    created_at: now,
                    updated_at: now,
                },
            )
            .ok_or(DbError::UniqueViolation {
                entity: ENTITY,
                field: "email",
            })?;

        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> RootPilotResult<User> {
        let user = self.store.tables().users.get(id).ok_or(DbError::NotFound {
            entity: ENTITY,
            id: id.to_string(),
        })?;
        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> RootPilotResult<User> {
        let user = self
            .store
            .tables()
            .users
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| DbError::NotFound {
                entity: ENTITY,
                id: format!("email={email}"),
            })?;
        Ok(user)
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> RootPilotResult<User> {
        let user = self
            .store
            .tables()
            .users
            .modify(id, |user| {
                if let Some(name) = input.name {
                    user.name = name;
                }
                if let Some(company) = input.company {
                    user.company = Some(company);
                }
                if let Some(role) = input.role {
                    user.role = Some(role);
                }
                user.updated_at = Utc::now();
            })
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        Ok(user)
    }
}
