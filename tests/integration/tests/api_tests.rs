//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (DATABASE_URL)
//! - Optionally Redis (REDIS_URL) for live notification publishing
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use futures::future::join_all;
use gym_core::{MemberId, Operator, TrainerId};
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

/// A started server, a trainer with a token, and one of their classes
struct Setup {
    server: TestServer,
    trainer: TrainerId,
    trainer_token: String,
    class: ClassResponse,
}

async fn setup(capacity: i32) -> Setup {
    let server = TestServer::start().await.expect("Failed to start server");
    let trainer = seed_trainer(&server.pool).await.unwrap();
    let trainer_token = server.token(Operator::trainer(trainer)).unwrap();

    let response = server
        .post_auth(
            "/api/v1/classes",
            &trainer_token,
            &CreateClassRequest::monday_spinning(capacity),
        )
        .await
        .unwrap();
    let class: ClassResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    Setup {
        server,
        trainer,
        trainer_token,
        class,
    }
}

impl Setup {
    async fn book(&self, member: MemberId, on: chrono::NaiveDate) -> reqwest::Response {
        self.server
            .post_auth(
                &format!("/api/v1/classes/{}/bookings", self.class.id),
                &self.trainer_token,
                &BookClassRequest {
                    member_id: member.into(),
                    date: on,
                },
            )
            .await
            .unwrap()
    }

    async fn availability(&self, on: chrono::NaiveDate) -> AvailabilityResponse {
        let response = self
            .server
            .get_auth(
                &format!("/api/v1/classes/{}/availability?date={on}", self.class.id),
                &self.trainer_token,
            )
            .await
            .unwrap();
        assert_json(response, StatusCode::OK).await.unwrap()
    }
}

async fn error_body(response: reqwest::Response, status: StatusCode) -> ErrorDetail {
    let body: ErrorBody = assert_json(response, status).await.unwrap();
    body.error
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "up");
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/classes").await.unwrap();
    let error = error_body(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(error.category, "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_auth("/api/v1/classes", "not-a-jwt")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Booking Admission Tests
// ============================================================================

#[tokio::test]
async fn test_successful_booking() {
    if !check_test_env() {
        return;
    }

    let setup = setup(5).await;
    let member = seed_member(&setup.server.pool, "Ana", "Lopez", Some(date(2025, 12, 31)))
        .await
        .unwrap();
    let monday = date(2025, 3, 10);

    let response = setup.book(member, monday).await;
    let booking: BookingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(booking.message, "Class booked successfully");
    assert_eq!(booking.class_id, setup.class.id);
    assert_eq!(booking.member_id, i64::from(member));
    assert_eq!(booking.occurrence_date, monday);
    assert!(booking.reservation_id > 0);

    let availability = setup.availability(monday).await;
    assert_eq!(availability.capacity, 5);
    assert_eq!(availability.occupied, 1);
    assert_eq!(availability.available, 4);
}

#[tokio::test]
async fn test_full_class_is_rejected() {
    if !check_test_env() {
        return;
    }

    let setup = setup(1).await;
    let pool = &setup.server.pool;
    let first = seed_member(pool, "Ana", "Lopez", Some(date(2025, 12, 31))).await.unwrap();
    let second = seed_member(pool, "Ben", "Ortiz", Some(date(2025, 12, 31))).await.unwrap();
    let monday = date(2025, 3, 10);

    assert_status(setup.book(first, monday).await, StatusCode::CREATED)
        .await
        .unwrap();
    let error = error_body(setup.book(second, monday).await, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert_eq!(error.category, "CAPACITY_EXCEEDED");

    // Another occurrence of the same class has its own seats
    assert_status(setup.book(second, date(2025, 3, 17)).await, StatusCode::CREATED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_duplicate_booking_is_rejected() {
    if !check_test_env() {
        return;
    }

    let setup = setup(5).await;
    let member = seed_member(&setup.server.pool, "Ana", "Lopez", Some(date(2025, 12, 31)))
        .await
        .unwrap();
    let monday = date(2025, 3, 10);

    assert_status(setup.book(member, monday).await, StatusCode::CREATED)
        .await
        .unwrap();
    let error = error_body(setup.book(member, monday).await, StatusCode::CONFLICT).await;
    assert_eq!(error.category, "DUPLICATE_BOOKING");
    assert_eq!(setup.availability(monday).await.occupied, 1);
}

#[tokio::test]
async fn test_membership_must_cover_the_date() {
    if !check_test_env() {
        return;
    }

    let setup = setup(5).await;
    let pool = &setup.server.pool;
    let expired = seed_member(pool, "Ana", "Lopez", Some(date(2025, 3, 1))).await.unwrap();
    let none = seed_member(pool, "Ben", "Ortiz", None).await.unwrap();
    let monday = date(2025, 3, 10);

    for member in [expired, none] {
        let error = error_body(setup.book(member, monday).await, StatusCode::FORBIDDEN).await;
        assert_eq!(error.category, "MEMBERSHIP_INELIGIBLE");
    }
    assert_eq!(setup.availability(monday).await.occupied, 0);
}

#[tokio::test]
async fn test_date_outside_class_range() {
    if !check_test_env() {
        return;
    }

    let setup = setup(5).await;
    let member = seed_member(&setup.server.pool, "Ana", "Lopez", Some(date(2025, 12, 31)))
        .await
        .unwrap();

    let response = setup.book(member, date(2025, 7, 7)).await;
    let error = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(error.code, "CLASS_NOT_AVAILABLE_FOR_DATE");
}

#[tokio::test]
async fn test_other_trainers_class_is_not_accessible() {
    if !check_test_env() {
        return;
    }

    let setup = setup(5).await;
    let pool = &setup.server.pool;
    let member = seed_member(pool, "Ana", "Lopez", Some(date(2025, 12, 31))).await.unwrap();
    let other = seed_trainer(pool).await.unwrap();
    let other_token = setup.server.token(Operator::trainer(other)).unwrap();

    let response = setup
        .server
        .post_auth(
            &format!("/api/v1/classes/{}/bookings", setup.class.id),
            &other_token,
            &BookClassRequest {
                member_id: member.into(),
                date: date(2025, 3, 10),
            },
        )
        .await
        .unwrap();
    let error = error_body(response, StatusCode::FORBIDDEN).await;
    assert_eq!(error.category, "NOT_FOUND_OR_UNAUTHORIZED");
}

#[tokio::test]
async fn test_inactive_class_rejects_bookings() {
    if !check_test_env() {
        return;
    }

    let setup = setup(5).await;
    let member = seed_member(&setup.server.pool, "Ana", "Lopez", Some(date(2025, 12, 31)))
        .await
        .unwrap();

    let response = setup
        .server
        .patch_auth(
            &format!("/api/v1/classes/{}", setup.class.id),
            &setup.trainer_token,
            &json!({ "active": false }),
        )
        .await
        .unwrap();
    let class: ClassResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!class.active);

    let error = error_body(setup.book(member, date(2025, 3, 10)).await, StatusCode::FORBIDDEN).await;
    assert_eq!(error.code, "CLASS_NOT_ACCESSIBLE");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_never_overfill() {
    if !check_test_env() {
        return;
    }

    let setup = setup(2).await;
    let mut members = Vec::new();
    for i in 0..6 {
        members.push(
            seed_member(&setup.server.pool, "Member", &format!("No{i}"), Some(date(2025, 12, 31)))
                .await
                .unwrap(),
        );
    }
    let monday = date(2025, 3, 10);

    let responses = join_all(members.iter().map(|member| setup.book(*member, monday))).await;
    let created = responses
        .iter()
        .filter(|r| r.status() == StatusCode::CREATED)
        .count();
    let full = responses
        .iter()
        .filter(|r| r.status() == StatusCode::UNPROCESSABLE_ENTITY)
        .count();

    assert_eq!(created, 2);
    assert_eq!(full, 4);
    assert_eq!(setup.availability(monday).await.occupied, 2);
}

// ============================================================================
// Member Self-Service Tests
// ============================================================================

#[tokio::test]
async fn test_member_books_cancels_and_rebooks() {
    if !check_test_env() {
        return;
    }

    let setup = setup(1).await;
    let member = seed_member(&setup.server.pool, "Ana", "Lopez", Some(date(2025, 12, 31)))
        .await
        .unwrap();
    let member_token = setup.server.token(Operator::member(member)).unwrap();
    let request = SelfBookingRequest {
        class_id: setup.class.id,
        date: date(2025, 3, 10),
    };

    let response = setup
        .server
        .post_auth("/api/v1/members/@me/bookings", &member_token, &request)
        .await
        .unwrap();
    let booking: BookingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = setup
        .server
        .post_empty(
            &format!("/api/v1/reservations/{}/cancel", booking.reservation_id),
            &member_token,
        )
        .await
        .unwrap();
    let cancelled: ReservationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");

    // The seat is free again and the member may book anew
    assert_eq!(setup.availability(request.date).await.available, 1);
    let response = setup
        .server
        .post_auth("/api/v1/members/@me/bookings", &member_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = setup
        .server
        .get_auth("/api/v1/members/@me/reservations", &member_token)
        .await
        .unwrap();
    let mine: Vec<ReservationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 2);
}

#[tokio::test]
async fn test_member_cannot_book_for_someone_else() {
    if !check_test_env() {
        return;
    }

    let setup = setup(5).await;
    let pool = &setup.server.pool;
    let member = seed_member(pool, "Ana", "Lopez", Some(date(2025, 12, 31))).await.unwrap();
    let other = seed_member(pool, "Ben", "Ortiz", Some(date(2025, 12, 31))).await.unwrap();
    let member_token = setup.server.token(Operator::member(member)).unwrap();

    let response = setup
        .server
        .post_auth(
            &format!("/api/v1/classes/{}/bookings", setup.class.id),
            &member_token,
            &BookClassRequest {
                member_id: other.into(),
                date: date(2025, 3, 10),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_own_membership_lookup() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = seed_member(&server.pool, "Ana", "Lopez", Some(date(2025, 3, 31)))
        .await
        .unwrap();
    let token = server.token(Operator::member(member)).unwrap();

    let response = server
        .get_auth("/api/v1/members/@me/membership?on=2025-03-01", &token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "current");
    assert_eq!(body["days_remaining"], 30);

    let response = server
        .get_auth("/api/v1/members/@me/membership?on=2025-04-01", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Attendance and Notification Tests
// ============================================================================

#[tokio::test]
async fn test_no_show_frees_the_seat() {
    if !check_test_env() {
        return;
    }

    let setup = setup(1).await;
    let pool = &setup.server.pool;
    let first = seed_member(pool, "Ana", "Lopez", Some(date(2025, 12, 31))).await.unwrap();
    let second = seed_member(pool, "Ben", "Ortiz", Some(date(2025, 12, 31))).await.unwrap();
    let monday = date(2025, 3, 10);

    let booking: BookingResponse = assert_json(setup.book(first, monday).await, StatusCode::CREATED)
        .await
        .unwrap();

    let response = setup
        .server
        .patch_auth(
            &format!("/api/v1/reservations/{}/status", booking.reservation_id),
            &setup.trainer_token,
            &json!({ "status": "no_show" }),
        )
        .await
        .unwrap();
    let updated: ReservationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.status, "no_show");

    assert_status(setup.book(second, monday).await, StatusCode::CREATED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_trainer_is_notified_of_bookings() {
    if !check_test_env() {
        return;
    }

    let setup = setup(5).await;
    let member = seed_member(&setup.server.pool, "Ana", "Lopez", Some(date(2025, 12, 31)))
        .await
        .unwrap();
    assert_status(setup.book(member, date(2025, 3, 10)).await, StatusCode::CREATED)
        .await
        .unwrap();

    // Delivery is asynchronous
    let mut inbox: Vec<NotificationResponse> = Vec::new();
    for _ in 0..50 {
        let response = setup
            .server
            .get_auth("/api/v1/notifications", &setup.trainer_token)
            .await
            .unwrap();
        inbox = assert_json(response, StatusCode::OK).await.unwrap();
        if !inbox.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(inbox.len(), 1, "trainer {} got no notification", setup.trainer);
    assert_eq!(inbox[0].event_type, "reservation_created");
    assert_eq!(inbox[0].message, "Ana Lopez booked Spinning for 2025-03-10");
    assert!(!inbox[0].read);

    let response = setup
        .server
        .post_empty(
            &format!("/api/v1/notifications/{}/read", inbox[0].id),
            &setup.trainer_token,
        )
        .await
        .unwrap();
    let read: NotificationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(read.read);
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_inputs_are_bad_requests() {
    if !check_test_env() {
        return;
    }

    let setup = setup(5).await;

    let response = setup
        .server
        .post_auth(
            &format!("/api/v1/classes/{}/bookings", setup.class.id),
            &setup.trainer_token,
            &json!({ "member_id": 1, "date": "not-a-date" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = setup
        .server
        .get_auth("/api/v1/classes/abc", &setup.trainer_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut request = CreateClassRequest::monday_spinning(0);
    request.name = "Empty".to_string();
    let response = setup
        .server
        .post_auth("/api/v1/classes", &setup.trainer_token, &request)
        .await
        .unwrap();
    let error = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(error.code, "VALIDATION_ERROR");
}
