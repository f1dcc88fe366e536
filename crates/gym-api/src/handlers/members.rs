//! Member handlers
//!
//! Self-service for the authenticated member, plus staff membership lookup.

use axum::{extract::State, Json};
use gym_core::{ClassId, MemberId};
use gym_service::dto::{
    BookingResponse, MembershipResponse, OnDateQuery, ReservationResponse, SelfBookingRequest,
};
use gym_service::{BookingService, MembershipService, ReservationService, ServiceError};

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /members/@me/membership?on=YYYY-MM-DD
pub async fn my_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<OnDateQuery>,
) -> ApiResult<Json<MembershipResponse>> {
    let membership = MembershipService::new(state.service_context())
        .my_membership(auth.operator, query.on)
        .await?;
    Ok(Json(membership))
}

/// GET /members/@me/reservations
pub async fn my_reservations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ReservationResponse>>> {
    let reservations = ReservationService::new(state.service_context())
        .my_reservations(auth.operator)
        .await?;
    Ok(Json(reservations))
}

/// Book a class for the authenticated member
///
/// POST /members/@me/bookings
pub async fn book_for_self(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SelfBookingRequest>,
) -> ApiResult<Created<BookingResponse>> {
    let member_id = auth
        .operator
        .as_member()
        .ok_or_else(|| ServiceError::permission_denied("book classes for themselves"))?;

    let booking = BookingService::new(state.service_context())
        .book(
            auth.operator,
            ClassId::new(request.class_id),
            member_id,
            request.date,
        )
        .await?;
    Ok(Created(booking))
}

/// GET /members/{member_id}/membership?on=YYYY-MM-DD
pub async fn member_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(member_id): IdPath<MemberId>,
    QueryParams(query): QueryParams<OnDateQuery>,
) -> ApiResult<Json<MembershipResponse>> {
    let membership = MembershipService::new(state.service_context())
        .member_membership(auth.operator, member_id, query.on)
        .await?;
    Ok(Json(membership))
}
