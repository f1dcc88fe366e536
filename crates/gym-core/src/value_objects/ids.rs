//! Typed identifiers - database-assigned 64-bit keys wrapped per aggregate
//!
//! Each id is a distinct type so a `MemberId` can never be passed where a
//! `ClassId` is expected. They serialize as plain JSON numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error when parsing an identifier from a path segment or string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid identifier format")]
    InvalidFormat,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>()
                    .ok()
                    .filter(|id| *id > 0)
                    .map(Self)
                    .ok_or(IdParseError::InvalidFormat)
            }
        }
    };
}

define_id!(
    /// Class schedule identifier
    ClassId
);
define_id!(
    /// Gym member identifier
    MemberId
);
define_id!(
    /// Trainer identifier
    TrainerId
);
define_id!(
    /// Reservation identifier
    ReservationId
);
define_id!(
    /// Membership record identifier
    MembershipId
);
define_id!(
    /// Notification identifier
    NotificationId
);
