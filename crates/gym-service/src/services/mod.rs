//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] and takes the acting
//! [`gym_core::Operator`] as an explicit argument.

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod class_schedule;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod membership;
pub mod notification;
pub mod permission;
pub mod reservation;

#[cfg(test)]
pub(crate) mod testing;

pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use calendar::CalendarService;
pub use class_schedule::ClassScheduleService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dispatcher::{NotificationDispatcher, DEFAULT_QUEUE_CAPACITY};
pub use error::{ServiceError, ServiceResult};
pub use membership::MembershipService;
pub use notification::NotificationService;
pub use permission::PermissionService;
pub use reservation::ReservationService;
