use axum::http::HeaderMap;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::User;

/// Resolves the `Authorization: Bearer <token>` header to the user behind
/// the session. The service trusts whatever identity the session row hands
/// it; credentials are never checked here.
pub fn authenticate(conn: &Connection, headers: &HeaderMap) -> Result<User, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    queries::get_session_user(conn, token)?.ok_or(AppError::Unauthorized)
}
