//! Repository implementations
//!
//! PostgreSQL implementations of the ports defined in gym-core.

mod booking;
mod class_schedule;
mod error;
mod membership;
mod notification;
mod reservation;

pub use booking::{PgBookingStore, PgBookingTx};
pub use class_schedule::PgClassScheduleRepository;
pub use error::ACTIVE_SLOT_INDEX;
pub use membership::{PgMemberRepository, PgMembershipRepository};
pub use notification::PgNotificationRepository;
pub use reservation::PgReservationRepository;
