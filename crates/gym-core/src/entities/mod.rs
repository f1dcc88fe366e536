//! Domain entities - core business objects

mod class_schedule;
mod member;
mod membership;
mod notification;
mod reservation;

pub use class_schedule::{ClassSchedule, NewClassSchedule};
pub use member::Member;
pub use membership::{Membership, MembershipStatus};
pub use notification::{event_types, NewNotification, Notification};
pub use reservation::{NewReservation, Reservation, ReservationStatus};

#[cfg(test)]
pub(crate) use class_schedule::sample_class;
