mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::NaiveDateTime;
use common::TestApp;
use room_timeline::domain::models::booking::{Booking, NewBookingParams};
use tower::ServiceExt;
use serde_json::{json, Value};

async fn post_json(app: &TestApp, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
    ).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_room(app: &TestApp, body: Value) -> String {
    let (status, room) = post_json(app, "/api/v1/rooms", &body).await;
    assert_eq!(status, StatusCode::OK, "room setup failed: {}", room);
    room["id"].as_str().unwrap().to_string()
}

fn booking_body(start_time: &str, end_time: &str) -> Value {
    json!({
        "date": "2024-05-06", "start_time": start_time, "end_time": end_time,
        "booked_for": "Ada", "reason": "Sync"
    })
}

#[tokio::test]
async fn test_confirmed_overlap_is_rejected() {
    let app = TestApp::new().await;
    let room_id = create_room(&app, json!({
        "name": "Aquarium", "building": "500", "floor": "1", "number": "001"
    })).await;
    let uri = format!("/api/v1/rooms/{}/bookings", room_id);

    let (status, _) = post_json(&app, &uri, &booking_body("09:00", "10:00")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, &uri, &booking_body("09:30", "10:30")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Slot conflicts with a confirmed booking");

    // adjacent slot is fine
    let (status, _) = post_json(&app, &uri, &booking_body("10:00", "11:00")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_pre_bookings_may_overlap() {
    let app = TestApp::new().await;
    let room_id = create_room(&app, json!({
        "name": "Pine Tree", "building": "500", "floor": "2", "number": "021",
        "reservations_need_confirmation": true
    })).await;
    let uri = format!("/api/v1/rooms/{}/bookings", room_id);

    let (status, first) = post_json(&app, &uri, &booking_body("09:00", "10:00")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "PENDING");

    let (status, second) = post_json(&app, &uri, &booking_body("09:00", "10:00")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["status"], "PENDING");
}

#[tokio::test]
async fn test_booking_on_blocked_date_is_rejected() {
    let app = TestApp::new().await;
    let room_id = create_room(&app, json!({
        "name": "Aquarium", "building": "500", "floor": "1", "number": "001"
    })).await;

    let (status, _) = post_json(&app, &format!("/api/v1/rooms/{}/blockings", room_id), &json!({
        "start_date": "2024-05-06", "end_date": "2024-05-07", "reason": "Maintenance"
    })).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/v1/rooms/{}/bookings", room_id);

    let (status, body) = post_json(&app, &uri, &json!({
        "date": "2024-05-07", "start_time": "09:00", "end_time": "10:00",
        "booked_for": "Ada", "reason": "Sync"
    })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Room is blocked on this date");

    // the day after the blocking ends is open again
    let (status, _) = post_json(&app, &uri, &json!({
        "date": "2024-05-08", "start_time": "09:00", "end_time": "10:00",
        "booked_for": "Ada", "reason": "Sync"
    })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_booking_outside_bookable_hours_is_rejected() {
    let app = TestApp::new().await;
    let room_id = create_room(&app, json!({
        "name": "Pagoda", "building": "500", "floor": "1", "number": "002",
        "bookable_hours": [{ "start": "08:00", "end": "12:00" }]
    })).await;
    let uri = format!("/api/v1/rooms/{}/bookings", room_id);

    let (status, _) = post_json(&app, &uri, &booking_body("13:00", "14:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // a slot fully inside the window is accepted
    let (status, _) = post_json(&app, &uri, &booking_body("09:00", "10:00")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_booking_rejects_inverted_times() {
    let app = TestApp::new().await;
    let room_id = create_room(&app, json!({
        "name": "Aquarium", "building": "500", "floor": "1", "number": "001"
    })).await;
    let uri = format!("/api/v1/rooms/{}/bookings", room_id);

    let (status, _) = post_json(&app, &uri, &booking_body("10:00", "09:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unreservable_room_rejects_bookings() {
    let app = TestApp::new().await;
    let room_id = create_room(&app, json!({
        "name": "Vault", "building": "513", "floor": "0", "number": "001",
        "is_reservable": false
    })).await;
    let uri = format!("/api/v1/rooms/{}/bookings", room_id);

    let (status, _) = post_json(&app, &uri, &booking_body("09:00", "10:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pending_booking_does_not_block_confirmed() {
    let app = TestApp::new().await;
    let room_id = create_room(&app, json!({
        "name": "Aquarium", "building": "500", "floor": "1", "number": "001"
    })).await;

    // seed a pending booking directly, overlapping the slot booked below
    let pending = Booking::new(NewBookingParams {
        room_id: room_id.clone(),
        start_dt: NaiveDateTime::parse_from_str("2024-05-06 09:00", "%Y-%m-%d %H:%M").unwrap(),
        end_dt: NaiveDateTime::parse_from_str("2024-05-06 10:00", "%Y-%m-%d %H:%M").unwrap(),
        booked_for: "Grace".to_string(),
        reason: "Awaiting approval".to_string(),
        needs_confirmation: true,
    });
    app.state.booking_repo.create(&pending).await.unwrap();

    let (status, booking) = post_json(
        &app,
        &format!("/api/v1/rooms/{}/bookings", room_id),
        &booking_body("09:30", "10:30"),
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["status"], "CONFIRMED");
}
