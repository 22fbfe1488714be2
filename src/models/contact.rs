use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A message left through the public contact form. No lifecycle beyond the
/// initial `new` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}
