//! Notification entity - an inbox message for an operator

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{NotificationId, Role};

/// Event types a notification can describe
pub mod event_types {
    pub const RESERVATION_CREATED: &str = "reservation_created";
    pub const RESERVATION_CANCELLED: &str = "reservation_cancelled";
    pub const RESERVATION_RESCHEDULED: &str = "reservation_rescheduled";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_role: Role,
    pub recipient_id: i64,
    pub event_type: String,
    pub title: String,
    pub message: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    #[inline]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// Notification payload handed to sinks; also the pub/sub wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub recipient_role: Role,
    pub recipient_id: i64,
    pub event_type: String,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    /// Tell a trainer that a member booked one of their classes
    pub fn reservation_created(
        trainer_id: i64,
        member_name: &str,
        class_name: &str,
        date: NaiveDate,
    ) -> Self {
        Self {
            recipient_role: Role::Trainer,
            recipient_id: trainer_id,
            event_type: event_types::RESERVATION_CREATED.to_string(),
            title: "New reservation".to_string(),
            message: format!("{member_name} booked {class_name} for {date}"),
        }
    }

    pub fn reservation_cancelled(
        trainer_id: i64,
        member_name: &str,
        class_name: &str,
        date: NaiveDate,
    ) -> Self {
        Self {
            recipient_role: Role::Trainer,
            recipient_id: trainer_id,
            event_type: event_types::RESERVATION_CANCELLED.to_string(),
            title: "Reservation cancelled".to_string(),
            message: format!("{member_name} cancelled {class_name} on {date}"),
        }
    }

    /// Tell a member their reservation moved to another date
    pub fn reservation_rescheduled(
        member_id: i64,
        class_name: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Self {
        Self {
            recipient_role: Role::Member,
            recipient_id: member_id,
            event_type: event_types::RESERVATION_RESCHEDULED.to_string(),
            title: "Reservation rescheduled".to_string(),
            message: format!("Your {class_name} reservation moved from {from} to {to}"),
        }
    }
}
