//! Notification inbox handlers

use axum::{extract::State, Json};
use gym_core::NotificationId;
use gym_service::dto::{NotificationQuery, NotificationResponse};
use gym_service::NotificationService;

use crate::extractors::{AuthUser, IdPath, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /notifications?limit=N
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<NotificationQuery>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let notifications = NotificationService::new(state.service_context())
        .list(auth.operator, query.limit)
        .await?;
    Ok(Json(notifications))
}

/// POST /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath<NotificationId>,
) -> ApiResult<Json<NotificationResponse>> {
    let notification = NotificationService::new(state.service_context())
        .mark_read(auth.operator, notification_id)
        .await?;
    Ok(Json(notification))
}
