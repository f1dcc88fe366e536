//! PostgreSQL booking transactions
//!
//! `lock_class` takes `SELECT ... FOR UPDATE` on the class row. Every
//! admission for a class queues on that lock, and under READ COMMITTED each
//! statement after the lock sees the reservations committed by whoever held
//! it before. The partial unique index `ux_reservations_active_slot` backs the
//! duplicate check.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use gym_core::traits::{BookingStore, BookingTx, RepoResult};
use gym_core::{
    ClassId, ClassSchedule, DomainError, MemberId, NewReservation, Reservation, ReservationId,
    ReservationStatus,
};

use crate::models::{ClassScheduleModel, ReservationModel};

use super::error::{map_db_error, map_reservation_write_error};
use super::reservation::FREE_SEAT_STATUSES;

#[derive(Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn begin(&self) -> RepoResult<Box<dyn BookingTx>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgBookingTx { tx }))
    }
}

/// One admission unit of work; rolled back when dropped uncommitted
pub struct PgBookingTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl BookingTx for PgBookingTx {
    #[instrument(skip(self))]
    async fn lock_class(&mut self, class_id: ClassId) -> RepoResult<Option<ClassSchedule>> {
        let result = sqlx::query_as::<_, ClassScheduleModel>(
            r#"
            SELECT id, trainer_id, name, description, capacity, day_of_week,
                   start_time, end_time, start_date, end_date, active, created_at, updated_at
            FROM class_schedules
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(class_id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        debug!(found = result.is_some(), "class row locked");
        result.map(ClassSchedule::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn lock_reservation(&mut self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        let result = sqlx::query_as::<_, ReservationModel>(
            r#"
            SELECT id, class_id, member_id, occurrence_date, status, created_at, updated_at
            FROM reservations
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        result.map(Reservation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn count_occupied(&mut self, class_id: ClassId, date: NaiveDate) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM reservations
            WHERE class_id = $1 AND occurrence_date = $2 AND status <> ALL($3)
            "#,
        )
        .bind(class_id.into_inner())
        .bind(date)
        .bind(&FREE_SEAT_STATUSES[..])
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn has_active_reservation(
        &mut self,
        class_id: ClassId,
        member_id: MemberId,
        date: NaiveDate,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM reservations
                WHERE class_id = $1 AND member_id = $2 AND occurrence_date = $3
                  AND status <> 'cancelled'
            )
            "#,
        )
        .bind(class_id.into_inner())
        .bind(member_id.into_inner())
        .bind(date)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn has_current_membership(
        &mut self,
        member_id: MemberId,
        on: NaiveDate,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM memberships
                WHERE member_id = $1 AND status = 'current' AND expiration_date >= $2
            )
            "#,
        )
        .bind(member_id.into_inner())
        .bind(on)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, reservation), fields(class_id = %reservation.class_id))]
    async fn insert_reservation(
        &mut self,
        reservation: &NewReservation,
    ) -> RepoResult<Reservation> {
        let model = sqlx::query_as::<_, ReservationModel>(
            r#"
            INSERT INTO reservations (class_id, member_id, occurrence_date, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, class_id, member_id, occurrence_date, status, created_at, updated_at
            "#,
        )
        .bind(reservation.class_id.into_inner())
        .bind(reservation.member_id.into_inner())
        .bind(reservation.occurrence_date)
        .bind(reservation.status.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_reservation_write_error)?;

        Reservation::try_from(model)
    }

    #[instrument(skip(self))]
    async fn move_reservation(
        &mut self,
        id: ReservationId,
        date: NaiveDate,
    ) -> RepoResult<Reservation> {
        let result = sqlx::query_as::<_, ReservationModel>(
            r#"
            UPDATE reservations
            SET occurrence_date = $2, status = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, class_id, member_id, occurrence_date, status, created_at, updated_at
            "#,
        )
        .bind(id.into_inner())
        .bind(date)
        .bind(ReservationStatus::Rescheduled.as_str())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_reservation_write_error)?;

        result
            .ok_or(DomainError::ReservationNotFound(id))
            .and_then(Reservation::try_from)
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }
}
