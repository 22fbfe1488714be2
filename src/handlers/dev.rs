use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::state::AppState;

// POST /api/dev/session
#[derive(Deserialize)]
pub struct DevSessionRequest {
    pub email: String,
}

#[derive(Serialize)]
pub struct DevSessionResponse {
    pub token: String,
    pub user_id: String,
    pub role: String,
}

/// Mints a session for a seeded user, bypassing any identity provider.
/// Local development only; outside dev mode the route plays dead.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DevSessionRequest>,
) -> Result<Json<DevSessionResponse>, AppError> {
    if !state.config.dev_mode {
        return Err(AppError::NotFound("no such route".to_string()));
    }

    let email = body.email.trim();

    let db = state.db.lock().unwrap();
    let user = queries::get_user_by_email(&db, email)?
        .ok_or_else(|| AppError::NotFound(format!("user {email}")))?;
    let token = queries::create_session(&db, &user.id)?;

    tracing::info!("dev session issued for {}", user.email);

    Ok(Json(DevSessionResponse {
        token,
        user_id: user.id,
        role: user.role.as_str().to_string(),
    }))
}
