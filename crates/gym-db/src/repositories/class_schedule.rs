//! PostgreSQL implementation of ClassScheduleRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use gym_core::traits::{ClassScheduleRepository, RepoResult};
use gym_core::{ClassId, ClassSchedule, DomainError, NewClassSchedule, TrainerId};

use crate::mappers::weekday_to_index;
use crate::models::ClassScheduleModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ClassScheduleRepository
#[derive(Clone)]
pub struct PgClassScheduleRepository {
    pool: PgPool,
}

impl PgClassScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_entities(models: Vec<ClassScheduleModel>) -> RepoResult<Vec<ClassSchedule>> {
    models.into_iter().map(ClassSchedule::try_from).collect()
}

#[async_trait]
impl ClassScheduleRepository for PgClassScheduleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ClassId) -> RepoResult<Option<ClassSchedule>> {
        let result = sqlx::query_as::<_, ClassScheduleModel>(
            r#"
            SELECT id, trainer_id, name, description, capacity, day_of_week,
                   start_time, end_time, start_date, end_date, active, created_at, updated_at
            FROM class_schedules
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ClassSchedule::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_trainer(&self, trainer_id: TrainerId) -> RepoResult<Vec<ClassSchedule>> {
        let results = sqlx::query_as::<_, ClassScheduleModel>(
            r#"
            SELECT id, trainer_id, name, description, capacity, day_of_week,
                   start_time, end_time, start_date, end_date, active, created_at, updated_at
            FROM class_schedules
            WHERE trainer_id = $1
            ORDER BY day_of_week, start_time, id
            "#,
        )
        .bind(trainer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(results)
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<ClassSchedule>> {
        let results = sqlx::query_as::<_, ClassScheduleModel>(
            r#"
            SELECT id, trainer_id, name, description, capacity, day_of_week,
                   start_time, end_time, start_date, end_date, active, created_at, updated_at
            FROM class_schedules
            WHERE active
            ORDER BY day_of_week, start_time, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(results)
    }

    #[instrument(skip(self, class), fields(trainer_id = %class.trainer_id))]
    async fn create(&self, class: &NewClassSchedule) -> RepoResult<ClassSchedule> {
        let model = sqlx::query_as::<_, ClassScheduleModel>(
            r#"
            INSERT INTO class_schedules (trainer_id, name, description, capacity, day_of_week,
                                         start_time, end_time, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, trainer_id, name, description, capacity, day_of_week,
                      start_time, end_time, start_date, end_date, active, created_at, updated_at
            "#,
        )
        .bind(class.trainer_id.into_inner())
        .bind(&class.name)
        .bind(&class.description)
        .bind(class.capacity)
        .bind(weekday_to_index(class.day_of_week))
        .bind(class.start_time)
        .bind(class.end_time)
        .bind(class.start_date)
        .bind(class.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        ClassSchedule::try_from(model)
    }

    #[instrument(skip(self, class), fields(class_id = %class.id))]
    async fn update(
        &self,
        class: &ClassSchedule,
        read_at: DateTime<Utc>,
    ) -> RepoResult<ClassSchedule> {
        let updated = sqlx::query_as::<_, ClassScheduleModel>(
            r#"
            UPDATE class_schedules
            SET name = $2, description = $3, capacity = $4, day_of_week = $5,
                start_time = $6, end_time = $7, start_date = $8, end_date = $9,
                active = $10,
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1 AND updated_at = $11
            RETURNING id, trainer_id, name, description, capacity, day_of_week,
                      start_time, end_time, start_date, end_date, active, created_at, updated_at
            "#,
        )
        .bind(class.id.into_inner())
        .bind(&class.name)
        .bind(&class.description)
        .bind(class.capacity)
        .bind(weekday_to_index(class.day_of_week))
        .bind(class.start_time)
        .bind(class.end_time)
        .bind(class.start_date)
        .bind(class.end_date)
        .bind(class.active)
        .bind(read_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = updated {
            return ClassSchedule::try_from(model);
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM class_schedules WHERE id = $1)")
                .bind(class.id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        if exists {
            Err(DomainError::ClassModified(class.id))
        } else {
            Err(DomainError::ClassNotFound(class.id))
        }
    }
}
