//! Domain errors - error types for the domain layer

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::entities::ReservationStatus;
use crate::value_objects::{ClassId, MemberId, NotificationId, ReservationId};

/// Coarse failure category reported to clients next to the error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    NotFoundOrUnauthorized,
    CapacityExceeded,
    DuplicateBooking,
    MembershipIneligible,
    TransientStoreFailure,
    NotFound,
    Validation,
    Conflict,
    Unauthenticated,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFoundOrUnauthorized => "NOT_FOUND_OR_UNAUTHORIZED",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::DuplicateBooking => "DUPLICATE_BOOKING",
            Self::MembershipIneligible => "MEMBERSHIP_INELIGIBLE",
            Self::TransientStoreFailure => "TRANSIENT_STORE_FAILURE",
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Internal => "INTERNAL",
        }
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Admission: class access
    // =========================================================================
    #[error("Class not found or not accessible: {0}")]
    ClassNotAccessible(ClassId),

    #[error("Class is not available for this date: {date}")]
    ClassUnavailableOnDate { class_id: ClassId, date: NaiveDate },

    #[error("Members can only book classes for themselves")]
    BookingForOtherMember,

    #[error("Reservation belongs to another member")]
    NotReservationHolder,

    // =========================================================================
    // Admission: capacity, duplicates, membership
    // =========================================================================
    #[error("No slots available: class capacity of {capacity} reached")]
    CapacityExceeded { capacity: i32 },

    #[error("Member is already booked for this class on this date")]
    DuplicateReservation,

    #[error("Member has no current membership for this date")]
    MembershipNotCurrent,

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Class not found: {0}")]
    ClassNotFound(ClassId),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(ReservationId),

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("No current membership for member {0}")]
    MembershipNotFound(MemberId),

    #[error("Notification not found: {0}")]
    NotificationNotFound(NotificationId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Capacity must be at least 1, got {0}")]
    InvalidCapacity(i32),

    #[error("Reservation is already on {0}")]
    RescheduleToSameDate(NaiveDate),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Cannot change reservation from {from} to {to}")]
    InvalidStatusTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Class {0} was modified concurrently; reload and retry")]
    ClassModified(ClassId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ClassNotAccessible(_) => "CLASS_NOT_ACCESSIBLE",
            Self::ClassUnavailableOnDate { .. } => "CLASS_NOT_AVAILABLE_FOR_DATE",
            Self::BookingForOtherMember => "CANNOT_BOOK_FOR_OTHER_MEMBER",
            Self::NotReservationHolder => "NOT_RESERVATION_HOLDER",

            Self::CapacityExceeded { .. } => "NO_SLOTS_AVAILABLE",
            Self::DuplicateReservation => "ALREADY_BOOKED",
            Self::MembershipNotCurrent => "NO_CURRENT_MEMBERSHIP",

            Self::ClassNotFound(_) => "UNKNOWN_CLASS",
            Self::ReservationNotFound(_) => "UNKNOWN_RESERVATION",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::MembershipNotFound(_) => "UNKNOWN_MEMBERSHIP",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidCapacity(_) => "INVALID_CAPACITY",
            Self::RescheduleToSameDate(_) => "RESCHEDULE_TO_SAME_DATE",

            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::ClassModified(_) => "CLASS_MODIFIED",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ClassNotAccessible(_)
            | Self::ClassUnavailableOnDate { .. }
            | Self::BookingForOtherMember
            | Self::NotReservationHolder => ErrorCategory::NotFoundOrUnauthorized,
            Self::CapacityExceeded { .. } => ErrorCategory::CapacityExceeded,
            Self::DuplicateReservation => ErrorCategory::DuplicateBooking,
            Self::MembershipNotCurrent => ErrorCategory::MembershipIneligible,
            Self::ClassNotFound(_)
            | Self::ReservationNotFound(_)
            | Self::MemberNotFound(_)
            | Self::MembershipNotFound(_)
            | Self::NotificationNotFound(_) => ErrorCategory::NotFound,
            Self::ValidationError(_) | Self::InvalidCapacity(_) | Self::RescheduleToSameDate(_) => {
                ErrorCategory::Validation
            }
            Self::InvalidStatusTransition { .. } | Self::ClassModified(_) => {
                ErrorCategory::Conflict
            }
            Self::DatabaseError(_) | Self::CacheError(_) => ErrorCategory::TransientStoreFailure,
            Self::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ClassUnavailableOnDate { .. } => 400,
            Self::ClassNotAccessible(_)
            | Self::BookingForOtherMember
            | Self::NotReservationHolder
            | Self::MembershipNotCurrent => 403,
            Self::CapacityExceeded { .. } => 422,
            Self::DuplicateReservation
            | Self::InvalidStatusTransition { .. }
            | Self::ClassModified(_) => 409,
            _ => match self.category() {
                ErrorCategory::NotFound => 404,
                ErrorCategory::Validation => 400,
                _ => 500,
            },
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Check if this error rejects an admission request
    pub fn is_admission_rejection(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::NotFoundOrUnauthorized
                | ErrorCategory::CapacityExceeded
                | ErrorCategory::DuplicateBooking
                | ErrorCategory::MembershipIneligible
        )
    }

    /// Check if this error comes from an unavailable store
    pub fn is_transient(&self) -> bool {
        self.category() == ErrorCategory::TransientStoreFailure
    }
}
