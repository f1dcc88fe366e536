//! Reservation database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for reservations table
#[derive(Debug, Clone, FromRow)]
pub struct ReservationModel {
    pub id: i64,
    pub class_id: i64,
    pub member_id: i64,
    pub occurrence_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
