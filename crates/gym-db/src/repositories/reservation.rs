//! PostgreSQL implementation of ReservationRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use gym_core::traits::{RepoResult, ReservationRepository};
use gym_core::{ClassId, MemberId, Reservation, ReservationId, ReservationStatus};

use crate::models::ReservationModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ReservationRepository
#[derive(Clone)]
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Statuses that do not take a seat, as stored in the status column
pub(crate) const FREE_SEAT_STATUSES: [&str; 2] = ["cancelled", "no_show"];

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        let result = sqlx::query_as::<_, ReservationModel>(
            r#"
            SELECT id, class_id, member_id, occurrence_date, status, created_at, updated_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reservation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_occurrence(
        &self,
        class_id: ClassId,
        date: NaiveDate,
    ) -> RepoResult<Vec<Reservation>> {
        let results = sqlx::query_as::<_, ReservationModel>(
            r#"
            SELECT id, class_id, member_id, occurrence_date, status, created_at, updated_at
            FROM reservations
            WHERE class_id = $1 AND occurrence_date = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(class_id.into_inner())
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reservation::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Reservation>> {
        let results = sqlx::query_as::<_, ReservationModel>(
            r#"
            SELECT id, class_id, member_id, occurrence_date, status, created_at, updated_at
            FROM reservations
            WHERE member_id = $1
            ORDER BY occurrence_date DESC, id DESC
            "#,
        )
        .bind(member_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reservation::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_occupied(&self, class_id: ClassId, date: NaiveDate) -> RepoResult<i64> {
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
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        next: ReservationStatus,
    ) -> RepoResult<Option<Reservation>> {
        let result = sqlx::query_as::<_, ReservationModel>(
            r#"
            UPDATE reservations
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING id, class_id, member_id, occurrence_date, status, created_at, updated_at
            "#,
        )
        .bind(id.into_inner())
        .bind(expected.as_str())
        .bind(next.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reservation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ReservationId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
