//! Notification entity <-> model mapper

use gym_core::{DomainError, Notification, NotificationId, Role};

use crate::models::NotificationModel;

use super::corrupt_row;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let recipient_role = Role::parse(&model.recipient_role)
            .ok_or_else(|| corrupt_row("notifications", "recipient_role", &model.recipient_role))?;

        Ok(Notification {
            id: NotificationId::new(model.id),
            recipient_role,
            recipient_id: model.recipient_id,
            event_type: model.event_type,
            title: model.title,
            message: model.message,
            read_at: model.read_at,
            created_at: model.created_at,
        })
    }
}
