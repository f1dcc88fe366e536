//! Test fixtures and data generators
//!
//! Seeds trainers, members and memberships straight into PostgreSQL and
//! provides the request/response shapes the API tests exchange.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use gym_core::{MemberId, TrainerId};
use gym_db::PgPool;
use serde::{Deserialize, Serialize};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique across tests and runs sharing one database
pub fn unique_suffix() -> String {
    format!(
        "{}_{}",
        Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn seed_trainer(pool: &PgPool) -> Result<TrainerId> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO trainers (first_name, last_name, email) VALUES ('Tess', 'Trainer', $1) RETURNING id",
    )
    .bind(format!("trainer_{}@example.com", unique_suffix()))
    .fetch_one(pool)
    .await?;
    Ok(TrainerId::new(id))
}

/// A member with, when `expires` is given, a current membership expiring then
pub async fn seed_member(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    expires: Option<NaiveDate>,
) -> Result<MemberId> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO members (first_name, last_name, email) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(format!("member_{}@example.com", unique_suffix()))
    .fetch_one(pool)
    .await?;

    if let Some(expires) = expires {
        sqlx::query(
            "INSERT INTO memberships (member_id, plan_name, status, start_date, expiration_date)
             VALUES ($1, 'Monthly', 'current', '2025-01-01', $2)",
        )
        .bind(id)
        .bind(expires)
        .execute(pool)
        .await?;
    }

    Ok(MemberId::new(id))
}

/// Create class body
#[derive(Debug, Clone, Serialize)]
pub struct CreateClassRequest {
    pub trainer_id: Option<i64>,
    pub name: String,
    pub capacity: i32,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl CreateClassRequest {
    /// Mondays 07:00-08:00, first half of 2025
    pub fn monday_spinning(capacity: i32) -> Self {
        Self {
            trainer_id: None,
            name: "Spinning".to_string(),
            capacity,
            day_of_week: 0,
            start_time: "07:00:00".to_string(),
            end_time: "08:00:00".to_string(),
            start_date: date(2025, 1, 1),
            end_date: Some(date(2025, 6, 30)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookClassRequest {
    pub member_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct SelfBookingRequest {
    pub class_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ClassResponse {
    pub id: i64,
    pub trainer_id: i64,
    pub name: String,
    pub capacity: i32,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct BookingResponse {
    pub message: String,
    pub reservation_id: i64,
    pub class_id: i64,
    pub member_id: i64,
    pub occurrence_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityResponse {
    pub capacity: i32,
    pub occupied: i64,
    pub available: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReservationResponse {
    pub id: i64,
    pub member_id: i64,
    pub occurrence_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: i64,
    pub event_type: String,
    pub message: String,
    pub read: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub category: String,
    pub message: String,
}
