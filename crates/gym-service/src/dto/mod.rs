//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    weekday_from_index, BookClassRequest, CreateClassRequest, NotificationQuery, OccurrenceQuery,
    OnDateQuery, RescheduleRequest, SelfBookingRequest, UpdateClassRequest,
    UpdateReservationStatusRequest,
};

pub use responses::{
    AvailabilityResponse, BookingResponse, CalendarResponse, ClassResponse,
    HealthChecks, HealthResponse, MembershipResponse, NotificationResponse, ReadinessResponse,
    ReservationResponse,
};

pub use mappers::BOOKING_CONFIRMED_MESSAGE;
