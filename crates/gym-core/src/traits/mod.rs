//! Ports implemented by the infrastructure crates

mod booking;
mod notifications;
mod repositories;

pub use booking::{BookingStore, BookingTx};
pub use notifications::NotificationSink;
pub use repositories::{
    ClassScheduleRepository, MemberRepository, MembershipRepository, NotificationRepository,
    RepoResult, ReservationRepository,
};
