//! Class handlers
//!
//! Class schedules, occurrence availability and rosters, and staff
//! bookings on behalf of a member.

use axum::{extract::State, Json};
use gym_core::{ClassId, MemberId};
use gym_service::dto::{
    AvailabilityResponse, BookClassRequest, BookingResponse, ClassResponse, CreateClassRequest,
    OccurrenceQuery, ReservationResponse, UpdateClassRequest,
};
use gym_service::{AvailabilityService, BookingService, ClassScheduleService, ReservationService};

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /classes
pub async fn create_class(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateClassRequest>,
) -> ApiResult<Created<ClassResponse>> {
    let class = ClassScheduleService::new(state.service_context())
        .create_class(auth.operator, request)
        .await?;
    Ok(Created(class))
}

/// GET /classes
pub async fn list_classes(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<ClassResponse>>> {
    let classes = ClassScheduleService::new(state.service_context())
        .list_active()
        .await?;
    Ok(Json(classes))
}

/// GET /classes/{class_id}
pub async fn get_class(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(class_id): IdPath<ClassId>,
) -> ApiResult<Json<ClassResponse>> {
    let class = ClassScheduleService::new(state.service_context())
        .get_class(auth.operator, class_id)
        .await?;
    Ok(Json(class))
}

/// PATCH /classes/{class_id}
pub async fn update_class(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(class_id): IdPath<ClassId>,
    ValidatedJson(request): ValidatedJson<UpdateClassRequest>,
) -> ApiResult<Json<ClassResponse>> {
    let class = ClassScheduleService::new(state.service_context())
        .update_class(auth.operator, class_id, request)
        .await?;
    Ok(Json(class))
}

/// GET /classes/{class_id}/availability?date=YYYY-MM-DD
pub async fn get_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(class_id): IdPath<ClassId>,
    QueryParams(query): QueryParams<OccurrenceQuery>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let availability = AvailabilityService::new(state.service_context())
        .availability(auth.operator, class_id, query.date)
        .await?;
    Ok(Json(availability))
}

/// GET /classes/{class_id}/reservations?date=YYYY-MM-DD
pub async fn get_roster(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(class_id): IdPath<ClassId>,
    QueryParams(query): QueryParams<OccurrenceQuery>,
) -> ApiResult<Json<Vec<ReservationResponse>>> {
    let roster = ReservationService::new(state.service_context())
        .roster(auth.operator, class_id, query.date)
        .await?;
    Ok(Json(roster))
}

/// Book a member into an occurrence
///
/// POST /classes/{class_id}/bookings
pub async fn book_class(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(class_id): IdPath<ClassId>,
    ValidatedJson(request): ValidatedJson<BookClassRequest>,
) -> ApiResult<Created<BookingResponse>> {
    let booking = BookingService::new(state.service_context())
        .book(
            auth.operator,
            class_id,
            MemberId::new(request.member_id),
            request.date,
        )
        .await?;
    Ok(Created(booking))
}
