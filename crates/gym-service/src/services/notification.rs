//! Notification inbox of the authenticated operator

use gym_core::{DomainError, NotificationId, Operator};
use tracing::instrument;

use crate::dto::NotificationResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub const DEFAULT_NOTIFICATION_LIMIT: i64 = 50;
pub const MAX_NOTIFICATION_LIMIT: i64 = 100;

pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest first
    #[instrument(skip(self), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn list(
        &self,
        operator: Operator,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let limit = limit
            .unwrap_or(DEFAULT_NOTIFICATION_LIMIT)
            .clamp(1, MAX_NOTIFICATION_LIMIT);
        let notifications = self
            .ctx
            .notification_repo()
            .find_for_recipient(operator.role, operator.id, limit)
            .await?;
        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    /// Mark one of the operator's notifications read; idempotent
    #[instrument(skip(self), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn mark_read(
        &self,
        operator: Operator,
        id: NotificationId,
    ) -> ServiceResult<NotificationResponse> {
        let notification = self
            .ctx
            .notification_repo()
            .mark_read(id, operator.role, operator.id)
            .await?
            .ok_or(DomainError::NotificationNotFound(id))?;
        Ok(NotificationResponse::from(notification))
    }
}
