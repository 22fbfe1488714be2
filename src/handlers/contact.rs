use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::db::queries;
use crate::errors::AppError;
use crate::models::ContactMessage;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ContactMessageResponse {
    id: String,
    name: String,
    email: String,
    subject: String,
    message: String,
    status: String,
    created_at: String,
}

impl ContactMessageResponse {
    fn from_message(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            status: m.status,
            created_at: m.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

// POST /api/contact
#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Public form; no session required.
pub async fn submit_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactMessageResponse>), AppError> {
    let name = body.name.as_deref().unwrap_or("").trim();
    let email = body.email.as_deref().unwrap_or("").trim();
    let subject = body.subject.as_deref().unwrap_or("").trim();
    let text = body.message.as_deref().unwrap_or("").trim();
    if name.is_empty() || email.is_empty() || subject.is_empty() || text.is_empty() {
        return Err(AppError::Validation(
            "name, email, subject and message are required".to_string(),
        ));
    }

    let message = ContactMessage {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        message: text.to_string(),
        status: "new".to_string(),
        created_at: Utc::now().naive_utc(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::insert_contact_message(&db, &message)?;
    }

    tracing::info!("contact message {} received", message.id);

    Ok((
        StatusCode::CREATED,
        Json(ContactMessageResponse::from_message(message)),
    ))
}

// GET /api/admin/messages
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ContactMessageResponse>>, AppError> {
    let db = state.db.lock().unwrap();
    let viewer = auth::authenticate(&db, &headers)?;
    if !viewer.role.is_admin() {
        return Err(AppError::Forbidden("forbidden: admin only".to_string()));
    }

    let messages = queries::list_contact_messages(&db)?;

    Ok(Json(
        messages
            .into_iter()
            .map(ContactMessageResponse::from_message)
            .collect(),
    ))
}
