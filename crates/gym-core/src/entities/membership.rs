//! Membership entity - a member's paid plan with an expiration date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::{MemberId, MembershipId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Current,
    Expired,
    Suspended,
    Cancelled,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Expired => "expired",
            Self::Suspended => "suspended",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "current" => Some(Self::Current),
            "expired" => Some(Self::Expired),
            "suspended" => Some(Self::Suspended),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: MembershipId,
    pub member_id: MemberId,
    pub plan_name: String,
    pub status: MembershipStatus,
    pub start_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

impl Membership {
    /// A membership entitles booking on `date` only while its status is
    /// `Current` and it has not expired before that date.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.status == MembershipStatus::Current && self.expiration_date >= date
    }

    /// Days left until expiration, counted from `today`; negative once expired
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.expiration_date - today).num_days()
    }
}
