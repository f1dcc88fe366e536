//! # gym-core
//!
//! Domain layer containing entities, value objects, repository and booking
//! store ports, and the weekly calendar layout.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod calendar;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use calendar::{CalendarBlock, WeeklyGrid};
pub use entities::{
    event_types, ClassSchedule, Member, Membership, MembershipStatus, NewClassSchedule,
    NewNotification, NewReservation, Notification, Reservation, ReservationStatus,
};
pub use error::{DomainError, ErrorCategory};
pub use traits::{
    BookingStore, BookingTx, ClassScheduleRepository, MemberRepository, MembershipRepository,
    NotificationRepository, NotificationSink, RepoResult, ReservationRepository,
};
pub use value_objects::{
    ClassId, IdParseError, MemberId, MembershipId, NotificationId, Operator, ReservationId, Role,
    SlotAvailability, TrainerId,
};
