//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{
    ClassSchedule, Member, Membership, NewClassSchedule, NewNotification, Notification,
    Reservation, ReservationStatus,
};
use crate::error::DomainError;
use crate::value_objects::{
    ClassId, MemberId, NotificationId, ReservationId, Role, TrainerId,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Class Schedule Repository
// ============================================================================

#[async_trait]
pub trait ClassScheduleRepository: Send + Sync {
    /// Find class by ID, active or not
    async fn find_by_id(&self, id: ClassId) -> RepoResult<Option<ClassSchedule>>;

    /// List every class a trainer owns
    async fn find_by_trainer(&self, trainer_id: TrainerId) -> RepoResult<Vec<ClassSchedule>>;

    /// List active classes, ordered by weekday and start time
    async fn find_active(&self) -> RepoResult<Vec<ClassSchedule>>;

    /// Create a class and return it with its assigned id
    async fn create(&self, class: &NewClassSchedule) -> RepoResult<ClassSchedule>;

    /// Persist every mutable field of a class read earlier.
    ///
    /// `read_at` is the `updated_at` the caller read; the write is refused
    /// with [`DomainError::ClassModified`] when the row changed since.
    async fn update(
        &self,
        class: &ClassSchedule,
        read_at: DateTime<Utc>,
    ) -> RepoResult<ClassSchedule>;
}

// ============================================================================
// Reservation Repository
// ============================================================================

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: ReservationId) -> RepoResult<Option<Reservation>>;

    /// Roster of one class occurrence, oldest booking first
    async fn find_by_occurrence(
        &self,
        class_id: ClassId,
        date: NaiveDate,
    ) -> RepoResult<Vec<Reservation>>;

    /// A member's reservations, most recent occurrence first
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Reservation>>;

    /// Reservations occupying a seat of one occurrence
    async fn count_occupied(&self, class_id: ClassId, date: NaiveDate) -> RepoResult<i64>;

    /// Compare-and-swap status update.
    ///
    /// Returns `None` when the reservation is no longer in `expected`.
    async fn update_status(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        next: ReservationStatus,
    ) -> RepoResult<Option<Reservation>>;

    /// Physically delete; returns whether a row was removed
    async fn delete(&self, id: ReservationId) -> RepoResult<bool>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Current membership that is still valid on `on`, latest expiry first
    async fn find_current(&self, member_id: MemberId, on: NaiveDate)
        -> RepoResult<Option<Membership>>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification>;

    /// Inbox of one recipient, newest first
    async fn find_for_recipient(
        &self,
        role: Role,
        recipient_id: i64,
        limit: i64,
    ) -> RepoResult<Vec<Notification>>;

    /// Mark read if it belongs to the recipient; returns the updated row
    async fn mark_read(
        &self,
        id: NotificationId,
        role: Role,
        recipient_id: i64,
    ) -> RepoResult<Option<Notification>>;
}
