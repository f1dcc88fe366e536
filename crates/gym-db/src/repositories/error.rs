//! Error handling utilities for repositories

use gym_core::DomainError;
use sqlx::Error as SqlxError;

/// Partial unique index guarding one live reservation per member and occurrence
pub const ACTIVE_SLOT_INDEX: &str = "ux_reservations_active_slot";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Unique violations on the active-slot index are duplicate bookings
pub fn map_reservation_write_error(e: SqlxError) -> DomainError {
    let on_active_slot = e
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        .is_some_and(|name| name == ACTIVE_SLOT_INDEX);

    if on_active_slot {
        return DomainError::DuplicateReservation;
    }
    map_unique_violation(e, || DomainError::DuplicateReservation)
}
