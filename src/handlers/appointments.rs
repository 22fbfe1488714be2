use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::db::queries;
use crate::errors::AppError;
use crate::models::{self, Appointment, AppointmentStatus, Category};
use crate::policy::{self, Decision};
use crate::state::AppState;

#[derive(Serialize)]
pub struct AppointmentResponse {
    id: String,
    user_id: String,
    date: String,
    time: String,
    category: String,
    status: String,
    notes: String,
    created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_email: Option<String>,
}

impl AppointmentResponse {
    fn from_appointment(a: Appointment) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            date: a.date.format("%Y-%m-%d").to_string(),
            time: a.time,
            category: a.category.as_str().to_string(),
            status: a.status.as_str().to_string(),
            notes: a.notes,
            created_at: a.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            user_name: None,
            user_email: None,
        }
    }

    fn from_row(row: queries::AppointmentWithOwner) -> Self {
        let mut response = Self::from_appointment(row.appointment);
        response.user_name = Some(row.owner_name);
        response.user_email = Some(row.owner_email);
        response
    }
}

// GET /api/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let db = state.db.lock().unwrap();
    let viewer = auth::authenticate(&db, &headers)?;

    // Admins see every appointment; everyone else only their own.
    let rows = if viewer.role.is_admin() {
        queries::list_all_appointments(&db)?
    } else {
        queries::list_appointments_for_owner(&db, &viewer.id)?
    };

    Ok(Json(
        rows.into_iter().map(AppointmentResponse::from_row).collect(),
    ))
}

// POST /api/appointments
#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub date: Option<String>,
    pub time: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let db = state.db.lock().unwrap();
    let viewer = auth::authenticate(&db, &headers)?;

    let date_raw = body.date.as_deref().unwrap_or("").trim();
    let time = body.time.as_deref().unwrap_or("").trim();
    let category_raw = body.category.as_deref().unwrap_or("").trim();
    if date_raw.is_empty() || time.is_empty() || category_raw.is_empty() {
        return Err(AppError::Validation(
            "date, time and category are required".to_string(),
        ));
    }

    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date: {date_raw}")))?;
    if !models::is_valid_time_slot(time) {
        return Err(AppError::Validation(format!("invalid time slot: {time}")));
    }
    let category = Category::parse(category_raw)
        .ok_or_else(|| AppError::Validation(format!("unknown category: {category_raw}")))?;

    let appointment = Appointment {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: viewer.id,
        date,
        time: time.to_string(),
        category,
        status: AppointmentStatus::Pending,
        notes: body.notes.unwrap_or_default(),
        created_at: Utc::now().naive_utc(),
    };
    queries::create_appointment(&db, &appointment)?;

    tracing::info!("created appointment {} ({})", appointment.id, time);

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from_appointment(appointment)),
    ))
}

// PATCH /api/appointments
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub id: Option<String>,
    pub status: Option<String>,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let db = state.db.lock().unwrap();
    let actor = auth::authenticate(&db, &headers)?;

    let id = body.id.as_deref().unwrap_or("").trim();
    let status_raw = body.status.as_deref().unwrap_or("").trim();
    if id.is_empty() || status_raw.is_empty() {
        return Err(AppError::Validation("id and status are required".to_string()));
    }
    let requested = AppointmentStatus::parse(status_raw)
        .ok_or_else(|| AppError::Validation(format!("unknown status: {status_raw}")))?;

    let mut appointment = queries::get_appointment_by_id(&db, id)?
        .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))?;

    let is_owner = appointment.user_id == actor.id;
    match policy::authorize_transition(actor.role, is_owner, appointment.status, requested) {
        Decision::Permit => {}
        Decision::Deny(reason) => return Err(AppError::Forbidden(reason.to_string())),
    }

    if !queries::update_appointment_status(&db, id, &requested)? {
        return Err(AppError::NotFound(format!("appointment {id}")));
    }
    appointment.status = requested;

    tracing::info!("appointment {} set to {}", appointment.id, requested.as_str());

    Ok(Json(AppointmentResponse::from_appointment(appointment)))
}
