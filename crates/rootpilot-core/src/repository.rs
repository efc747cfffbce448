//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups of a missing id fail
//! with [`RootPilotError::NotFound`](crate::error::RootPilotError);
//! deletes report whether a record was actually removed. Listing by
//! owner returns records in insertion order.

use uuid::Uuid;

use crate::error::RootPilotResult;
use crate::models::{
    action_item::{ActionItem, CreateActionItem, UpdateActionItem},
    incident::{CreateIncident, Incident, IncidentStatus, UpdateIncident},
    project::{AnalysisProject, CreateProject, UpdateProject},
    rca_result::{CreateRcaResult, RcaResult, UpdateRcaResult},
    user::{CreateUser, UpdateUser, User},
};

pub trait UserRepository: Send + Sync {
    /// Fails with `AlreadyExists` if the email is taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = RootPilotResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RootPilotResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = RootPilotResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = RootPilotResult<User>> + Send;
}

pub trait ProjectRepository: Send + Sync {
    fn create(
        &self,
        input: CreateProject,
    ) -> impl Future<Output = RootPilotResult<AnalysisProject>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RootPilotResult<AnalysisProject>> + Send;
    fn list_by_owner(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = RootPilotResult<Vec<AnalysisProject>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateProject,
    ) -> impl Future<Output = RootPilotResult<AnalysisProject>> + Send;
    /// Does not cascade to any dependent records.
    fn delete(&self, id: Uuid) -> impl Future<Output = RootPilotResult<bool>> + Send;
}

pub trait IncidentRepository: Send + Sync {
    fn create(
        &self,
        input: CreateIncident,
    ) -> impl Future<Output = RootPilotResult<Incident>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RootPilotResult<Incident>> + Send;
    fn list_by_owner(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = RootPilotResult<Vec<Incident>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateIncident,
    ) -> impl Future<Output = RootPilotResult<Incident>> + Send;
    /// Move the incident to `to` if its current status is one of `from`.
    /// Check and write happen atomically; any other status fails with
    /// `Conflict` and leaves the record untouched.
    fn transition_status(
        &self,
        id: Uuid,
        from: &[IncidentStatus],
        to: IncidentStatus,
    ) -> impl Future<Output = RootPilotResult<Incident>> + Send;
    /// Does not cascade to the incident's RCA result or action items.
    fn delete(&self, id: Uuid) -> impl Future<Output = RootPilotResult<bool>> + Send;
}

pub trait RcaResultRepository: Send + Sync {
    /// Fails with `AlreadyExists` if the incident already has a result.
    fn create(
        &self,
        input: CreateRcaResult,
    ) -> impl Future<Output = RootPilotResult<RcaResult>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RootPilotResult<RcaResult>> + Send;
    fn get_by_incident(
        &self,
        incident_id: Uuid,
    ) -> impl Future<Output = RootPilotResult<RcaResult>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateRcaResult,
    ) -> impl Future<Output = RootPilotResult<RcaResult>> + Send;
    /// Does not cascade to the result's action items.
    fn delete(&self, id: Uuid) -> impl Future<Output = RootPilotResult<bool>> + Send;
}

pub trait ActionItemRepository: Send + Sync {
    fn create(
        &self,
        input: CreateActionItem,
    ) -> impl Future<Output = RootPilotResult<ActionItem>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RootPilotResult<ActionItem>> + Send;
    fn list_by_rca_result(
        &self,
        rca_result_id: Uuid,
    ) -> impl Future<Output = RootPilotResult<Vec<ActionItem>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateActionItem,
    ) -> impl Future<Output = RootPilotResult<ActionItem>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = RootPilotResult<bool>> + Send;
}
