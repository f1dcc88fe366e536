//! Reservation entity - one member's seat in one class occurrence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::{ClassId, MemberId, ReservationId};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Reserved,
    Attended,
    NoShow,
    Cancelled,
    Rescheduled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Attended => "attended",
            Self::NoShow => "no_show",
            Self::Cancelled => "cancelled",
            Self::Rescheduled => "rescheduled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reserved" => Some(Self::Reserved),
            "attended" => Some(Self::Attended),
            "no_show" => Some(Self::NoShow),
            "cancelled" => Some(Self::Cancelled),
            "rescheduled" => Some(Self::Rescheduled),
            _ => None,
        }
    }

    /// Whether a reservation in this status takes a seat
    #[inline]
    pub fn occupies_slot(self) -> bool {
        !matches!(self, Self::Cancelled | Self::NoShow)
    }

    /// Whether a reservation in this status prevents a second booking
    /// of the same member for the same occurrence
    #[inline]
    pub fn blocks_duplicate(self) -> bool {
        self != Self::Cancelled
    }

    /// Reservation still waiting for its occurrence
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Reserved | Self::Rescheduled)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        self.is_open() && next != Self::Reserved
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub class_id: ClassId,
    pub member_id: MemberId,
    pub occurrence_date: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Move to `next`, rejecting transitions out of terminal states
    pub fn transition(&mut self, next: ReservationStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Reservation awaiting insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub class_id: ClassId,
    pub member_id: MemberId,
    pub occurrence_date: NaiveDate,
    pub status: ReservationStatus,
}

impl NewReservation {
    /// Fresh booking in `Reserved` status
    pub fn reserved(class_id: ClassId, member_id: MemberId, occurrence_date: NaiveDate) -> Self {
        Self {
            class_id,
            member_id,
            occurrence_date,
            status: ReservationStatus::Reserved,
        }
    }
}
