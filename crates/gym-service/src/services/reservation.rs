//! Reservation lifecycle
//!
//! Cancel, attendance, deletion and reservation listings. Status changes are
//! compare-and-swap on the status that was read, so of two concurrent
//! changes exactly one wins and the other reports an invalid transition.

use chrono::NaiveDate;
use gym_core::{
    ClassId, ClassSchedule, DomainError, NewNotification, Operator, Reservation, ReservationId,
    ReservationStatus, Role,
};
use tracing::{info, instrument};

use crate::dto::ReservationResponse;

use super::booking::member_display_name;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::{require_manager, require_member, require_staff, PermissionService};

pub struct ReservationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReservationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cancel an open reservation, freeing its seat.
    ///
    /// Allowed for the class's trainer, admins and the reserving member.
    #[instrument(skip(self), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn cancel(
        &self,
        operator: Operator,
        reservation_id: ReservationId,
    ) -> ServiceResult<ReservationResponse> {
        let (reservation, class) = self.load(reservation_id).await?;

        match operator.role {
            Role::Member => {
                if operator.as_member() != Some(reservation.member_id) {
                    return Err(DomainError::NotReservationHolder.into());
                }
            }
            Role::Trainer | Role::Admin => require_manager(operator, &class)?,
        }

        let cancelled = self
            .change_status(&reservation, ReservationStatus::Cancelled)
            .await?;
        info!(reservation_id = %reservation_id, "Reservation cancelled");

        if operator.role == Role::Member {
            let member_name = member_display_name(self.ctx, reservation.member_id).await;
            self.ctx.notifier().dispatch(NewNotification::reservation_cancelled(
                class.trainer_id.into_inner(),
                &member_name,
                &class.name,
                reservation.occurrence_date,
            ));
        }

        Ok(ReservationResponse::from(cancelled))
    }

    /// Record the attendance outcome: `Attended` or `NoShow`
    #[instrument(skip(self), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn set_attendance(
        &self,
        operator: Operator,
        reservation_id: ReservationId,
        status: ReservationStatus,
    ) -> ServiceResult<ReservationResponse> {
        if !matches!(status, ReservationStatus::Attended | ReservationStatus::NoShow) {
            return Err(ServiceError::validation(
                "status must be attended or no_show",
            ));
        }
        require_staff(operator, "record attendance")?;

        let (reservation, class) = self.load(reservation_id).await?;
        require_manager(operator, &class)?;

        let updated = self.change_status(&reservation, status).await?;
        info!(reservation_id = %reservation_id, status = %status, "Attendance recorded");

        Ok(ReservationResponse::from(updated))
    }

    /// Remove a reservation record entirely
    #[instrument(skip(self), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn delete(&self, operator: Operator, reservation_id: ReservationId) -> ServiceResult<()> {
        require_staff(operator, "delete reservations")?;

        let (_, class) = self.load(reservation_id).await?;
        require_manager(operator, &class)?;

        if !self.ctx.reservation_repo().delete(reservation_id).await? {
            return Err(DomainError::ReservationNotFound(reservation_id).into());
        }
        info!(reservation_id = %reservation_id, "Reservation deleted");
        Ok(())
    }

    /// Every reservation of one occurrence, for the class's trainer or an admin
    #[instrument(skip(self), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn roster(
        &self,
        operator: Operator,
        class_id: ClassId,
        date: NaiveDate,
    ) -> ServiceResult<Vec<ReservationResponse>> {
        PermissionService::new(self.ctx)
            .managed_class(operator, class_id)
            .await?;

        let reservations = self
            .ctx
            .reservation_repo()
            .find_by_occurrence(class_id, date)
            .await?;
        Ok(reservations.iter().map(ReservationResponse::from).collect())
    }

    /// The authenticated member's reservations, latest occurrence first
    #[instrument(skip(self), fields(operator_id = operator.id))]
    pub async fn my_reservations(&self, operator: Operator) -> ServiceResult<Vec<ReservationResponse>> {
        let member_id = require_member(operator, "list member reservations")?;
        let reservations = self.ctx.reservation_repo().find_by_member(member_id).await?;
        Ok(reservations.iter().map(ReservationResponse::from).collect())
    }

    async fn load(&self, id: ReservationId) -> ServiceResult<(Reservation, ClassSchedule)> {
        let reservation = self
            .ctx
            .reservation_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReservationNotFound(id))?;
        let class = self
            .ctx
            .class_repo()
            .find_by_id(reservation.class_id)
            .await?
            .ok_or(DomainError::ClassNotAccessible(reservation.class_id))?;
        Ok((reservation, class))
    }

    async fn change_status(
        &self,
        reservation: &Reservation,
        next: ReservationStatus,
    ) -> ServiceResult<Reservation> {
        let mut target = reservation.clone();
        target.transition(next)?;

        let updated = self
            .ctx
            .reservation_repo()
            .update_status(reservation.id, reservation.status, next)
            .await?;

        match updated {
            Some(updated) => Ok(updated),
            None => {
                // Lost the race: report against the status that won
                let current = self
                    .ctx
                    .reservation_repo()
                    .find_by_id(reservation.id)
                    .await?
                    .ok_or(DomainError::ReservationNotFound(reservation.id))?;
                Err(DomainError::InvalidStatusTransition {
                    from: current.status,
                    to: next,
                }
                .into())
            }
        }
    }
}
