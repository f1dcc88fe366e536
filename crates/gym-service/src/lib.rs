//! # gym-service
//!
//! Application layer: booking admission, reservation lifecycle, class
//! schedules, memberships, notifications and the weekly calendar.

pub mod dto;
pub mod services;

pub use services::{
    AvailabilityService, BookingService, CalendarService, ClassScheduleService,
    MembershipService, NotificationDispatcher, NotificationService, ReservationService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
