use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateBookingRequest;
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::error::AppError;
use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_booking: Starting for room {}", room_id);

    let room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    if !room.is_reservable {
        return Err(AppError::Validation("Room is not reservable".into()));
    }

    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    let start_time = NaiveTime::parse_from_str(&payload.start_time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid start time format (HH:MM)".into()))?;
    let end_time = NaiveTime::parse_from_str(&payload.end_time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid end time format (HH:MM)".into()))?;

    if start_time >= end_time {
        return Err(AppError::Validation("start_time must be before end_time".into()));
    }

    let start_dt = date.and_time(start_time);
    let end_dt = date.and_time(end_time);

    let bookable_hours = room.bookable_hours();
    if !bookable_hours.is_empty() {
        let fits = bookable_hours.iter().any(|hours| {
            match (
                NaiveTime::parse_from_str(&hours.start, "%H:%M"),
                NaiveTime::parse_from_str(&hours.end, "%H:%M"),
            ) {
                (Ok(start), Ok(end)) => start <= start_time && end_time <= end,
                _ => false,
            }
        });
        if !fits {
            return Err(AppError::Validation("Booking is outside the room's bookable hours".into()));
        }
    }

    let covering = state.blocking_repo.find_covering(&room.id, date).await?;
    if !covering.is_empty() {
        warn!("Booking rejected: room {} is blocked on {}", room.id, date);
        return Err(AppError::Conflict("Room is blocked on this date".into()));
    }

    let overlapping = state.booking_repo.count_overlap(&room.id, start_dt, end_dt).await?;
    if overlapping > 0 {
        warn!("Booking rejected: {} confirmed booking(s) overlap the requested slot", overlapping);
        return Err(AppError::Conflict("Slot conflicts with a confirmed booking".into()));
    }

    let booking = Booking::new(NewBookingParams {
        room_id: room.id.clone(),
        start_dt,
        end_dt,
        booked_for: payload.booked_for,
        reason: payload.reason,
        needs_confirmation: room.reservations_need_confirmation,
    });

    let created = state.booking_repo.create(&booking).await?;
    info!("Booking created: {} for room {} ({})", created.id, room.id, created.status);
    Ok(Json(created))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let bookings = state.booking_repo.list_by_room(&room_id).await?;
    Ok(Json(bookings))
}
