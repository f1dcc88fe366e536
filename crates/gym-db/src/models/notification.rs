//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub recipient_role: String,
    pub recipient_id: i64,
    pub event_type: String,
    pub title: String,
    pub message: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
