//! In-memory implementation of [`IncidentRepository`].

use chrono::Utc;
use rootpilot_core::error::RootPilotResult;
use rootpilot_core::models::incident::{CreateIncident, Incident, IncidentStatus, UpdateIncident};
use rootpilot_core::repository::IncidentRepository;
use uuid::Uuid;

use crate::error::DbError;
use crate::store::MemStore;

const ENTITY: &str = "Incident";

#[derive(Clone)]
pub struct MemIncidentRepository {
    store: MemStore,
}

impl MemIncidentRepository {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

impl IncidentRepository for MemIncidentRepository {
    async fn create(&self, input: CreateIncident) -> RootPilotResult<Incident> {
        let now = Utc::now();
        let ctx = input.context;
        let incident = self.store.tables().incidents.insert(|id| Incident {
            id,
            user_id: input.user_id,
            title: input.title,
            description: input.description,
            incident_date: input.incident_date,
            location: ctx.location,
            affected_assets: ctx.affected_assets,
            system_data: ctx.system_data,
            maintenance_history: ctx.maintenance_history,
            operator_factors: ctx.operator_factors,
            environmental_factors: ctx.environmental_factors,
            process_context: ctx.process_context,
            risk_compliance: ctx.risk_compliance,
            attachments: ctx.attachments,
            status: input.status,
            created_at: now,
            updated_at: now,
        });
        Ok(incident)
    }

    async fn get_by_id(&self, id: Uuid) -> RootPilotResult<Incident> {
        let incident = self
            .store
            .tables()
            .incidents
            .get(id)
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        Ok(incident)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> RootPilotResult<Vec<Incident>> {
        Ok(self
            .store
            .tables()
            .incidents
            .filter(|i| i.user_id == user_id))
    }

    async fn update(&self, id: Uuid, input: UpdateIncident) -> RootPilotResult<Incident> {
        let incident = self
            .store
            .tables()
            .incidents
            .modify(id, |incident| apply_update(incident, input))
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        Ok(incident)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: &[IncidentStatus],
        to: IncidentStatus,
    ) -> RootPilotResult<Incident> {
        let outcome = self
            .store
            .tables()
            .incidents
            .modify_if(
                id,
                |incident| from.contains(&incident.status),
                |incident| {
                    incident.status = to;
                    incident.updated_at = Utc::now();
                },
            )
            .ok_or(DbError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;
        outcome.map_err(|current| {
            DbError::StatusMismatch {
                entity: ENTITY,
                current: current.status.as_str().into(),
            }
            .into()
        })
    }

    async fn delete(&self, id: Uuid) -> RootPilotResult<bool> {
        Ok(self.store.tables().incidents.remove(id))
    }
}

fn apply_update(incident: &mut Incident, input: UpdateIncident) {
    let UpdateIncident {
        title,
        description,
        incident_date,
        location,
        affected_assets,
        system_data,
        maintenance_history,
        operator_factors,
        environmental_factors,
        process_context,
        risk_compliance,
        attachments,
        status,
    } = input;

    if let Some(v) = title {
        incident.title = v;
    }
    if let Some(v) = description {
        incident.description = v;
    }
    if let Some(v) = incident_date {
        incident.incident_date = v;
    }
    if let Some(v) = status {
        incident.status = v;
    }
    if location.is_some() {
        incident.location = location;
    }
    if affected_assets.is_some() {
        incident.affected_assets = affected_assets;
    }
    if system_data.is_some() {
        incident.system_data = system_data;
    }
    if maintenance_history.is_some() {
        incident.maintenance_history = maintenance_history;
    }
    if operator_factors.is_some() {
        incident.operator_factors = operator_factors;
    }
    if environmental_factors.is_some() {
        incident.environmental_factors = environmental_factors;
    }
    if process_context.is_some() {
        incident.process_context = process_context;
    }
    if risk_compliance.is_some() {
        incident.risk_compliance = risk_compliance;
    }
    if attachments.is_some() {
        incident.attachments = attachments;
    }
    incident.updated_at = Utc::now();
}
