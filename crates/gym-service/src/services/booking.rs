//! Booking admission
//!
//! Every admission runs inside one [`BookingTx`]: the class row is locked
//! first, then the date range, capacity, duplicate and membership checks run
//! in that order, and the reservation is inserted before commit. Any failed
//! check drops the transaction, so nothing is written. The trainer
//! notification is queued only after commit and never affects the outcome.

use chrono::NaiveDate;
use gym_core::traits::BookingTx;
use gym_core::{
    ClassId, ClassSchedule, DomainError, MemberId, NewNotification, NewReservation, Operator,
    Reservation, ReservationId, ReservationStatus, Role, SlotAvailability,
};
use tracing::{debug, info, instrument, warn};

use crate::dto::{BookingResponse, ReservationResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::{require_manager, require_staff};

pub struct BookingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Admit `member_id` to the occurrence of `class_id` on `date`
    #[instrument(skip(self), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn book(
        &self,
        operator: Operator,
        class_id: ClassId,
        member_id: MemberId,
        date: NaiveDate,
    ) -> ServiceResult<BookingResponse> {
        if operator.role == Role::Member && operator.as_member() != Some(member_id) {
            return Err(DomainError::BookingForOtherMember.into());
        }

        let mut tx = self.ctx.booking_store().begin().await?;

        let class = tx
            .lock_class(class_id)
            .await?
            .ok_or(DomainError::ClassNotAccessible(class_id))?;
        if operator.role == Role::Trainer {
            require_manager(operator, &class)?;
        }

        check_admission(tx.as_mut(), &class, member_id, date).await?;

        let reservation = tx
            .insert_reservation(&NewReservation::reserved(class_id, member_id, date))
            .await?;
        tx.commit().await?;

        info!(
            reservation_id = %reservation.id,
            class_id = %class_id,
            member_id = %member_id,
            date = %date,
            "Reservation created"
        );

        self.notify_trainer(&class, &reservation).await;

        Ok(BookingResponse::from(&reservation))
    }

    /// Move an open reservation to another occurrence of the same class.
    ///
    /// The new date goes through the same admission checks as a booking.
    #[instrument(skip(self), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn reschedule(
        &self,
        operator: Operator,
        reservation_id: ReservationId,
        date: NaiveDate,
    ) -> ServiceResult<ReservationResponse> {
        require_staff(operator, "reschedule reservations")?;

        let mut tx = self.ctx.booking_store().begin().await?;

        let current = tx
            .lock_reservation(reservation_id)
            .await?
            .ok_or(DomainError::ReservationNotFound(reservation_id))?;
        let class = tx
            .lock_class(current.class_id)
            .await?
            .ok_or(DomainError::ClassNotAccessible(current.class_id))?;
        require_manager(operator, &class)?;

        if !current.status.can_transition_to(ReservationStatus::Rescheduled) {
            return Err(DomainError::InvalidStatusTransition {
                from: current.status,
                to: ReservationStatus::Rescheduled,
            }
            .into());
        }
        if current.occurrence_date == date {
            return Err(DomainError::RescheduleToSameDate(date).into());
        }

        check_admission(tx.as_mut(), &class, current.member_id, date).await?;

        let moved = tx.move_reservation(reservation_id, date).await?;
        tx.commit().await?;

        info!(
            reservation_id = %reservation_id,
            from = %current.occurrence_date,
            to = %date,
            "Reservation rescheduled"
        );

        self.ctx.notifier().dispatch(NewNotification::reservation_rescheduled(
            current.member_id.into_inner(),
            &class.name,
            current.occurrence_date,
            date,
        ));

        Ok(ReservationResponse::from(moved))
    }

    async fn notify_trainer(&self, class: &ClassSchedule, reservation: &Reservation) {
        let member_name = member_display_name(self.ctx, reservation.member_id).await;
        self.ctx.notifier().dispatch(NewNotification::reservation_created(
            class.trainer_id.into_inner(),
            &member_name,
            &class.name,
            reservation.occurrence_date,
        ));
    }
}

/// Availability, capacity, duplicate and membership checks, in that order
pub(crate) async fn check_admission(
    tx: &mut dyn BookingTx,
    class: &ClassSchedule,
    member_id: MemberId,
    date: NaiveDate,
) -> Result<(), DomainError> {
    if !class.active {
        debug!(class_id = %class.id, "Rejected: class inactive");
        return Err(DomainError::ClassNotAccessible(class.id));
    }
    if !class.covers(date) {
        debug!(class_id = %class.id, date = %date, "Rejected: date outside class range");
        return Err(DomainError::ClassUnavailableOnDate {
            class_id: class.id,
            date,
        });
    }

    let occupied = tx.count_occupied(class.id, date).await?;
    if SlotAvailability::new(class.capacity, occupied).is_full() {
        debug!(class_id = %class.id, occupied, capacity = class.capacity, "Rejected: class full");
        return Err(DomainError::CapacityExceeded {
            capacity: class.capacity,
        });
    }

    if tx.has_active_reservation(class.id, member_id, date).await? {
        debug!(member_id = %member_id, "Rejected: already booked");
        return Err(DomainError::DuplicateReservation);
    }

    if !tx.has_current_membership(member_id, date).await? {
        debug!(member_id = %member_id, date = %date, "Rejected: no current membership");
        return Err(DomainError::MembershipNotCurrent);
    }

    Ok(())
}

/// Name for notifications; falls back to the id when the lookup fails
pub(crate) async fn member_display_name(ctx: &ServiceContext, member_id: MemberId) -> String {
    match ctx.member_repo().find_by_id(member_id).await {
        Ok(Some(member)) => member.full_name(),
        Ok(None) => format!("Member #{member_id}"),
        Err(e) => {
            warn!(member_id = %member_id, error = %e, "Member lookup for notification failed");
            format!("Member #{member_id}")
        }
    }
}
