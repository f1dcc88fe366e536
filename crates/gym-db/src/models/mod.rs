//! Database models - SQLx-compatible structs for PostgreSQL tables

mod class_schedule;
mod member;
mod membership;
mod notification;
mod reservation;

pub use class_schedule::ClassScheduleModel;
pub use member::MemberModel;
pub use membership::MembershipModel;
pub use notification::NotificationModel;
pub use reservation::ReservationModel;
