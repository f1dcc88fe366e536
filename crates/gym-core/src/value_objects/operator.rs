//! Operator identity - who is performing an operation
//!
//! Identity is established outside the domain (a validated access token) and
//! passed into every operation explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{MemberId, TrainerId};

/// Role of an authenticated operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Trainer,
    Member,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Trainer => "trainer",
            Self::Member => "member",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "trainer" => Some(Self::Trainer),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    pub id: i64,
    pub role: Role,
}

impl Operator {
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub const fn admin(id: i64) -> Self {
        Self::new(id, Role::Admin)
    }

    pub const fn trainer(id: TrainerId) -> Self {
        Self::new(id.into_inner(), Role::Trainer)
    }

    pub const fn member(id: MemberId) -> Self {
        Self::new(id.into_inner(), Role::Member)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Trainer id when the operator is a trainer
    pub fn as_trainer(&self) -> Option<TrainerId> {
        (self.role == Role::Trainer).then(|| TrainerId::new(self.id))
    }

    /// Member id when the operator is a member
    pub fn as_member(&self) -> Option<MemberId> {
        (self.role == Role::Member).then(|| MemberId::new(self.id))
    }

    /// Admins manage every class, trainers only their own
    pub fn manages_classes_of(&self, trainer_id: TrainerId) -> bool {
        self.is_admin() || self.as_trainer() == Some(trainer_id)
    }
}
