//! Model to entity mappers
//!
//! Rows carry enums as text and weekdays as smallints, so every conversion is
//! a `TryFrom` that reports corrupt rows as `DomainError::DatabaseError`.

mod class_schedule;
mod member;
mod membership;
mod notification;
mod reservation;

pub use class_schedule::{weekday_from_index, weekday_to_index};

use gym_core::DomainError;

pub(crate) fn corrupt_row(table: &str, column: &str, value: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("unexpected {table}.{column} value: {value}"))
}
