//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use gym_core::{CalendarBlock, MembershipStatus, ReservationStatus, Role};
use serde::Serialize;

// ============================================================================
// Class Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ClassResponse {
    pub id: i64,
    pub trainer_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    /// 0 = Monday ... 6 = Sunday
    pub day_of_week: u8,
    pub day_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Seats of one class occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityResponse {
    pub class_id: i64,
    pub date: NaiveDate,
    pub capacity: i32,
    pub occupied: i64,
    pub available: i64,
}

// ============================================================================
// Reservation Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub id: i64,
    pub class_id: i64,
    pub member_id: i64,
    pub occurrence_date: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Successful admission
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub message: String,
    pub reservation_id: i64,
    pub class_id: i64,
    pub member_id: i64,
    pub occurrence_date: NaiveDate,
}

// ============================================================================
// Membership Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub id: i64,
    pub member_id: i64,
    pub plan_name: String,
    pub status: MembershipStatus,
    pub start_date: NaiveDate,
    pub expiration_date: NaiveDate,
    /// Days left counted from the date the lookup was made for
    pub days_remaining: i64,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: i64,
    pub recipient_role: Role,
    pub recipient_id: i64,
    pub event_type: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Calendar Responses
// ============================================================================

/// Weekly calendar grid with placed class blocks
#[derive(Debug, Clone, Serialize)]
pub struct CalendarResponse {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_minutes: u32,
    pub rows: u32,
    pub blocks: Vec<CalendarBlock>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness probe response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: String,
    /// Absent when no Redis is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<String>,
}
