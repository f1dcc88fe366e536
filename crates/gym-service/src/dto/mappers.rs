//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::NaiveDate;
use gym_core::{ClassSchedule, Membership, Notification, Reservation, SlotAvailability, WeeklyGrid};

use super::responses::{
    AvailabilityResponse, BookingResponse, CalendarResponse, ClassResponse, MembershipResponse,
    NotificationResponse, ReservationResponse,
};

pub const BOOKING_CONFIRMED_MESSAGE: &str = "Class booked successfully";

// ============================================================================
// Class Mappers
// ============================================================================

impl From<&ClassSchedule> for ClassResponse {
    fn from(class: &ClassSchedule) -> Self {
        Self {
            id: class.id.into_inner(),
            trainer_id: class.trainer_id.into_inner(),
            name: class.name.clone(),
            description: class.description.clone(),
            capacity: class.capacity,
            day_of_week: class.day_of_week.num_days_from_monday() as u8,
            day_name: class.day_of_week.to_string(),
            start_time: class.start_time,
            end_time: class.end_time,
            duration_minutes: class.duration_minutes(),
            start_date: class.start_date,
            end_date: class.end_date,
            active: class.active,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

impl From<ClassSchedule> for ClassResponse {
    fn from(class: ClassSchedule) -> Self {
        Self::from(&class)
    }
}

impl AvailabilityResponse {
    pub fn new(class: &ClassSchedule, date: NaiveDate, slots: SlotAvailability) -> Self {
        Self {
            class_id: class.id.into_inner(),
            date,
            capacity: slots.capacity,
            occupied: slots.occupied,
            available: slots.available(),
        }
    }
}

// ============================================================================
// Reservation Mappers
// ============================================================================

impl From<&Reservation> for ReservationResponse {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id.into_inner(),
            class_id: reservation.class_id.into_inner(),
            member_id: reservation.member_id.into_inner(),
            occurrence_date: reservation.occurrence_date,
            status: reservation.status,
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
        }
    }
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self::from(&reservation)
    }
}

impl From<&Reservation> for BookingResponse {
    fn from(reservation: &Reservation) -> Self {
        Self {
            message: BOOKING_CONFIRMED_MESSAGE.to_string(),
            reservation_id: reservation.id.into_inner(),
            class_id: reservation.class_id.into_inner(),
            member_id: reservation.member_id.into_inner(),
            occurrence_date: reservation.occurrence_date,
        }
    }
}

// ============================================================================
// Membership Mappers
// ============================================================================

impl MembershipResponse {
    pub fn new(membership: &Membership, on: NaiveDate) -> Self {
        Self {
            id: membership.id.into_inner(),
            member_id: membership.member_id.into_inner(),
            plan_name: membership.plan_name.clone(),
            status: membership.status,
            start_date: membership.start_date,
            expiration_date: membership.expiration_date,
            days_remaining: membership.days_remaining(on),
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.into_inner(),
            recipient_role: notification.recipient_role,
            recipient_id: notification.recipient_id,
            event_type: notification.event_type.clone(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            read: notification.is_read(),
            read_at: notification.read_at,
            created_at: notification.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self::from(&notification)
    }
}

// ============================================================================
// Calendar Mappers
// ============================================================================

impl CalendarResponse {
    pub fn new(grid: WeeklyGrid, classes: &[ClassSchedule]) -> Self {
        Self {
            start_time: grid.start(),
            end_time: grid.end(),
            slot_minutes: grid.slot_minutes(),
            rows: grid.rows(),
            blocks: grid.layout(classes),
        }
    }
}
