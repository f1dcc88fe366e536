//! Reservation lifecycle handlers

use axum::{extract::State, Json};
use gym_core::ReservationId;
use gym_service::dto::{RescheduleRequest, ReservationResponse, UpdateReservationStatusRequest};
use gym_service::{BookingService, ReservationService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Record attendance: `attended` or `no_show`
///
/// PATCH /reservations/{reservation_id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(reservation_id): IdPath<ReservationId>,
    ValidatedJson(request): ValidatedJson<UpdateReservationStatusRequest>,
) -> ApiResult<Json<ReservationResponse>> {
    let reservation = ReservationService::new(state.service_context())
        .set_attendance(auth.operator, reservation_id, request.status)
        .await?;
    Ok(Json(reservation))
}

/// POST /reservations/{reservation_id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(reservation_id): IdPath<ReservationId>,
) -> ApiResult<Json<ReservationResponse>> {
    let reservation = ReservationService::new(state.service_context())
        .cancel(auth.operator, reservation_id)
        .await?;
    Ok(Json(reservation))
}

/// POST /reservations/{reservation_id}/reschedule
pub async fn reschedule(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(reservation_id): IdPath<ReservationId>,
    ValidatedJson(request): ValidatedJson<RescheduleRequest>,
) -> ApiResult<Json<ReservationResponse>> {
    let reservation = BookingService::new(state.service_context())
        .reschedule(auth.operator, reservation_id, request.date)
        .await?;
    Ok(Json(reservation))
}

/// DELETE /reservations/{reservation_id}
pub async fn delete_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(reservation_id): IdPath<ReservationId>,
) -> ApiResult<NoContent> {
    ReservationService::new(state.service_context())
        .delete(auth.operator, reservation_id)
        .await?;
    Ok(NoContent)
}
