//! Trainer self-service handlers

use axum::{extract::State, Json};
use gym_service::dto::{CalendarResponse, ClassResponse};
use gym_service::{CalendarService, ClassScheduleService};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /trainers/@me/classes
pub async fn my_classes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ClassResponse>>> {
    let classes = ClassScheduleService::new(state.service_context())
        .my_classes(auth.operator)
        .await?;
    Ok(Json(classes))
}

/// Weekly grid of the trainer's classes; admins see every active class
///
/// GET /trainers/@me/calendar
pub async fn my_calendar(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CalendarResponse>> {
    let calendar = CalendarService::new(state.service_context())
        .weekly(auth.operator)
        .await?;
    Ok(Json(calendar))
}
