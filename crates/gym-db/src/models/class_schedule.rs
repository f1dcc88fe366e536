//! Class schedule database model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

/// Database model for class_schedules table
#[derive(Debug, Clone, FromRow)]
pub struct ClassScheduleModel {
    pub id: i64,
    pub trainer_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    /// 0 = Monday
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
