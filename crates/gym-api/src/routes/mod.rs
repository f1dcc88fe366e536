//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes sit at the root.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{classes, health, members, notifications, reservations, trainers};
use crate::state::AppState;

/// API router, without the health probes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept apart so they bypass rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(class_routes())
        .merge(trainer_routes())
        .merge(reservation_routes())
        .merge(member_routes())
        .merge(notification_routes())
}

fn class_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/classes",
            get(classes::list_classes).post(classes::create_class),
        )
        .route(
            "/classes/:class_id",
            get(classes::get_class).patch(classes::update_class),
        )
        .route("/classes/:class_id/availability", get(classes::get_availability))
        .route("/classes/:class_id/reservations", get(classes::get_roster))
        .route("/classes/:class_id/bookings", post(classes::book_class))
}

fn trainer_routes() -> Router<AppState> {
    Router::new()
        .route("/trainers/@me/classes", get(trainers::my_classes))
        .route("/trainers/@me/calendar", get(trainers::my_calendar))
}

fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations/:reservation_id",
            delete(reservations::delete_reservation),
        )
        .route(
            "/reservations/:reservation_id/status",
            patch(reservations::update_status),
        )
        .route("/reservations/:reservation_id/cancel", post(reservations::cancel))
        .route(
            "/reservations/:reservation_id/reschedule",
            post(reservations::reschedule),
        )
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members/@me/membership", get(members::my_membership))
        .route("/members/@me/reservations", get(members::my_reservations))
        .route("/members/@me/bookings", post(members::book_for_self))
        .route(
            "/members/:member_id/membership",
            get(members::member_membership),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
}
