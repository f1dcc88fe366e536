//! Value objects - immutable types that represent domain concepts

mod ids;
mod operator;
mod slots;

pub use ids::{
    ClassId, IdParseError, MemberId, MembershipId, NotificationId, ReservationId, TrainerId,
};
pub use operator::{Operator, Role};
pub use slots::SlotAvailability;
