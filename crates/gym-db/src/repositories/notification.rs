//! PostgreSQL notification inbox
//!
//! Implements both the repository read by the inbox endpoints and the
//! sink the dispatcher delivers into.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gym_core::traits::{NotificationRepository, NotificationSink, RepoResult};
use gym_core::{NewNotification, Notification, NotificationId, Role};

use crate::models::NotificationModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(event_type = %notification.event_type))]
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification> {
        let model = sqlx::query_as::<_, NotificationModel>(
            r#"
            INSERT INTO notifications (recipient_role, recipient_id, event_type, title, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, recipient_role, recipient_id, event_type, title, message,
                      read_at, created_at
            "#,
        )
        .bind(notification.recipient_role.as_str())
        .bind(notification.recipient_id)
        .bind(&notification.event_type)
        .bind(&notification.title)
        .bind(&notification.message)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Notification::try_from(model)
    }

    #[instrument(skip(self))]
    async fn find_for_recipient(
        &self,
        role: Role,
        recipient_id: i64,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        let results = sqlx::query_as::<_, NotificationModel>(
            r#"
            SELECT id, recipient_role, recipient_id, event_type, title, message,
                   read_at, created_at
            FROM notifications
            WHERE recipient_role = $1 AND recipient_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(role.as_str())
        .bind(recipient_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Notification::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn mark_read(
        &self,
        id: NotificationId,
        role: Role,
        recipient_id: i64,
    ) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(
            r#"
            UPDATE notifications
            SET read_at = COALESCE(read_at, NOW())
            WHERE id = $1 AND recipient_role = $2 AND recipient_id = $3
            RETURNING id, recipient_role, recipient_id, event_type, title, message,
                      read_at, created_at
            "#,
        )
        .bind(id.into_inner())
        .bind(role.as_str())
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Notification::try_from).transpose()
    }
}

#[async_trait]
impl NotificationSink for PgNotificationRepository {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn deliver(&self, notification: &NewNotification) -> RepoResult<()> {
        self.create(notification).await.map(|_| ())
    }
}
