//! Incident intake and CRUD, scoped to the caller.

use std::ops::RangeInclusive;

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rootpilot_core::error::{RootPilotError, RootPilotResult};
use rootpilot_core::models::incident::{
    CreateIncident, Incident, IncidentContext, IncidentStatus, UpdateIncident,
};
use rootpilot_core::repository::IncidentRepository;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{MessageResponse, owned_incident};
use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser, parse_id};
use crate::state::AppState;

const MIN_DESCRIPTION_CHARS: usize = 10;
const INCIDENT_YEARS: RangeInclusive<i32> = 1900..=2100;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentRequest {
    pub title: String,
    pub description: String,
    pub incident_date: String,
    pub location: Option<String>,
    pub affected_assets: Option<Vec<String>>,
    pub system_data: Option<Value>,
    pub maintenance_history: Option<Value>,
    pub operator_factors: Option<Value>,
    pub environmental_factors: Option<Value>,
    pub process_context: Option<Value>,
    pub risk_compliance: Option<Value>,
    pub attachments: Option<Value>,
    pub status: Option<IncidentStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncidentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub incident_date: Option<String>,
    pub location: Option<String>,
    pub affected_assets: Option<Vec<String>>,
    pub system_data: Option<Value>,
    pub maintenance_history: Option<Value>,
    pub operator_factors: Option<Value>,
    pub environmental_factors: Option<Value>,
    pub process_context: Option<Value>,
    pub risk_compliance: Option<Value>,
    pub attachments: Option<Value>,
    pub status: Option<IncidentStatus>,
}

/// RFC 3339, or a bare `YYYY-MM-DD` taken as midnight UTC. The year
/// must fall within `INCIDENT_YEARS`.
fn parse_incident_date(raw: &str) -> RootPilotResult<DateTime<Utc>> {
    let raw = raw.trim();
    let parsed = match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(_) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc()),
    };
    let date = parsed.ok_or_else(|| {
        RootPilotError::validation("incidentDate must be an RFC 3339 timestamp or YYYY-MM-DD")
    })?;
    if !INCIDENT_YEARS.contains(&date.year()) {
        return Err(RootPilotError::validation(format!(
            "incidentDate year must be between {} and {}",
            INCIDENT_YEARS.start(),
            INCIDENT_YEARS.end()
        )));
    }
    Ok(date)
}

fn check_title(title: &str) -> RootPilotResult<()> {
    if title.trim().is_empty() {
        return Err(RootPilotError::validation("title is required"));
    }
    Ok(())
}

fn check_description(description: &str) -> RootPilotResult<()> {
    if description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(RootPilotError::validation(format!(
            "description must be at least {MIN_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(())
}

fn check_client_status(status: IncidentStatus) -> RootPilotResult<()> {
    if !status.is_client_settable() {
        return Err(RootPilotError::validation(
            "status may only be set to draft or pending",
        ));
    }
    Ok(())
}

pub async fn list_incidents(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<Vec<Incident>>> {
    Ok(Json(state.incidents.list_by_owner(caller.user_id).await?))
}

pub async fn create_incident(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiJson(body): ApiJson<CreateIncidentRequest>,
) -> ApiResult<Json<Incident>> {
    check_title(&body.title)?;
    check_description(&body.description)?;
    let incident_date = parse_incident_date(&body.incident_date)?;
    let status = body.status.unwrap_or_default();
    check_client_status(status)?;

    let incident = state
        .incidents
        .create(CreateIncident {
            user_id: caller.user_id,
            title: body.title.trim().to_string(),
            description: body.description.trim().to_string(),
            incident_date,
            context: IncidentContext {
                location: body.location,
                affected_assets: body.affected_assets,
                system_data: body.system_data,
                maintenance_history: body.maintenance_history,
                operator_factors: body.operator_factors,
                environmental_factors: body.environmental_factors,
                process_context: body.process_context,
                risk_compliance: body.risk_compliance,
                attachments: body.attachments,
            },
            status,
        })
        .await?;
    info!(incident_id = %incident.id, user_id = %caller.user_id, "Incident created");
    Ok(Json(incident))
}

pub async fn get_incident(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Incident>> {
    let id = parse_id(&id, "Incident")?;
    Ok(Json(owned_incident(&state, &caller, id).await?))
}

pub async fn update_incident(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateIncidentRequest>,
) -> ApiResult<Json<Incident>> {
    let id = parse_id(&id, "Incident")?;
    let current = owned_incident(&state, &caller, id).await?;

    if let Some(title) = &body.title {
        check_title(title)?;
    }
    if let Some(description) = &body.description {
        check_description(description)?;
    }
    let incident_date = body
        .incident_date
        .as_deref()
        .map(parse_incident_date)
        .transpose()?;
    if let Some(status) = body.status {
        check_client_status(status)?;
        if !current.status.is_client_settable() {
            return Err(RootPilotError::validation(
                "status cannot change once analysis has started",
            )
            .into());
        }
    }

    let incident = state
        .incidents
        .update(
            id,
            UpdateIncident {
                title: body.title.map(|t| t.trim().to_string()),
                description: body.description.map(|d| d.trim().to_string()),
                incident_date,
                location: body.location,
                affected_assets: body.affected_assets,
                system_data: body.system_data,
                maintenance_history: body.maintenance_history,
                operator_factors: body.operator_factors,
                environmental_factors: body.environmental_factors,
                process_context: body.process_context,
                risk_compliance: body.risk_compliance,
                attachments: body.attachments,
                status: body.status,
            },
        )
        .await?;
    info!(incident_id = %id, "Incident updated");
    Ok(Json(incident))
}

/// Leaves any RCA result and action items for the incident in place.
pub async fn delete_incident(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, "Incident")?;
    owned_incident(&state, &caller, id).await?;

    if !state.incidents.delete(id).await? {
        return Err(RootPilotError::not_found("Incident", id).into());
    }
    info!(incident_id = %id, user_id = %caller.user_id, "Incident deleted");
    Ok(Json(MessageResponse {
        message: "Incident deleted successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn incident_date_accepts_rfc3339_and_plain_dates() {
        let ts = parse_incident_date("2024-01-15T14:02:00Z").unwrap();
        assert_eq!((ts.hour(), ts.minute()), (14, 2));

        let offset = parse_incident_date("2024-01-15T16:02:00+02:00").unwrap();
        assert_eq!(offset, ts);

        let day = parse_incident_date("2024-01-15").unwrap();
        assert_eq!((day.day(), day.hour()), (15, 0));

        assert!(parse_incident_date("15/01/2024").is_err());
        assert!(parse_incident_date("").is_err());
    }

    #[test]
    fn incident_date_year_is_bounded() {
        assert!(parse_incident_date("1900-01-01").is_ok());
        assert!(parse_incident_date("2100-12-31T23:59:59Z").is_ok());

        for raw in ["+262142-12-31", "-0001-01-01", "1899-12-31", "2101-01-01"] {
            match parse_incident_date(raw) {
                Err(RootPilotError::Validation { .. }) => {}
                other => panic!("{raw} gave {other:?}"),
            }
        }
    }

    #[test]
    fn description_needs_ten_characters() {
        assert!(check_description("too short").is_err());
        assert!(check_description("Unexpected pump trip at 14:02").is_ok());
    }

    #[test]
    fn clients_cannot_set_analysis_statuses() {
        assert!(check_client_status(IncidentStatus::Pending).is_ok());
        assert!(check_client_status(IncidentStatus::Analyzing).is_err());
        assert!(check_client_status(IncidentStatus::Completed).is_err());
    }
}
