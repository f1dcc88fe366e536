//! Booking store port - the transactional unit behind admission
//!
//! Every booking decision reads and writes through one [`BookingTx`]. An
//! implementation must hold an exclusive lock on the class from
//! [`BookingTx::lock_class`] until commit or drop, so concurrent admissions
//! for the same class observe each other's committed inserts. Dropping a
//! transaction without calling [`BookingTx::commit`] discards its writes.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{ClassSchedule, NewReservation, Reservation};
use crate::value_objects::{ClassId, MemberId, ReservationId};

use super::RepoResult;

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn begin(&self) -> RepoResult<Box<dyn BookingTx>>;
}

#[async_trait]
pub trait BookingTx: Send {
    /// Load the class and lock it for the rest of the transaction
    async fn lock_class(&mut self, class_id: ClassId) -> RepoResult<Option<ClassSchedule>>;

    /// Load a reservation and lock its row
    async fn lock_reservation(&mut self, id: ReservationId) -> RepoResult<Option<Reservation>>;

    /// Reservations occupying a seat of the occurrence
    async fn count_occupied(&mut self, class_id: ClassId, date: NaiveDate) -> RepoResult<i64>;

    /// Whether the member already holds a non-cancelled reservation
    async fn has_active_reservation(
        &mut self,
        class_id: ClassId,
        member_id: MemberId,
        date: NaiveDate,
    ) -> RepoResult<bool>;

    /// Whether the member holds a current membership valid on `on`
    async fn has_current_membership(&mut self, member_id: MemberId, on: NaiveDate)
        -> RepoResult<bool>;

    async fn insert_reservation(&mut self, reservation: &NewReservation)
        -> RepoResult<Reservation>;

    /// Move a reservation to `date` and mark it rescheduled
    async fn move_reservation(&mut self, id: ReservationId, date: NaiveDate)
        -> RepoResult<Reservation>;

    async fn commit(self: Box<Self>) -> RepoResult<()>;
}
