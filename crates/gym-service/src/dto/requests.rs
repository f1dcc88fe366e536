//! Request DTOs for API endpoints
//!
//! Request bodies implement `Deserialize` and `Validate`; query parameter
//! structs only need `Deserialize` unless they carry bounds.

use chrono::{NaiveDate, NaiveTime, Weekday};
use gym_core::ReservationStatus;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Class Requests
// ============================================================================

/// Create class request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClassRequest {
    /// Owning trainer; required for admins, implied for trainers
    #[validate(range(min = 1, message = "trainer_id must be positive"))]
    pub trainer_id: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "Class name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 500, message = "Capacity must be between 1 and 500"))]
    pub capacity: i32,

    /// 0 = Monday ... 6 = Sunday
    #[validate(range(max = 6, message = "day_of_week must be 0 (Monday) to 6 (Sunday)"))]
    pub day_of_week: u8,

    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Update class request; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClassRequest {
    #[validate(length(min = 1, max = 100, message = "Class name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 500, message = "Capacity must be between 1 and 500"))]
    pub capacity: Option<i32>,

    #[validate(range(max = 6, message = "day_of_week must be 0 (Monday) to 6 (Sunday)"))]
    pub day_of_week: Option<u8>,

    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// Remove the end date, leaving the class open-ended
    #[serde(default)]
    pub clear_end_date: bool,

    pub active: Option<bool>,
}

/// Weekday for a 0-based, Monday-first index
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

// ============================================================================
// Booking Requests
// ============================================================================

/// Book a class occurrence for a member
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookClassRequest {
    #[validate(range(min = 1, message = "member_id must be positive"))]
    pub member_id: i64,

    /// Occurrence date
    pub date: NaiveDate,
}

/// Member booking a class for themselves
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelfBookingRequest {
    #[validate(range(min = 1, message = "class_id must be positive"))]
    pub class_id: i64,

    pub date: NaiveDate,
}

// ============================================================================
// Reservation Requests
// ============================================================================

/// Attendance outcome of a reservation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReservationStatusRequest {
    /// `attended` or `no_show`
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RescheduleRequest {
    pub date: NaiveDate,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// `?date=YYYY-MM-DD`
#[derive(Debug, Clone, Deserialize)]
pub struct OccurrenceQuery {
    pub date: NaiveDate,
}

/// `?on=YYYY-MM-DD`, today when absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnDateQuery {
    pub on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NotificationQuery {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}
