use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateRoomRequest;
use crate::domain::models::room::{NewRoomParams, Room};
use crate::error::AppError;
use std::sync::Arc;
use chrono::{NaiveDateTime, NaiveTime};
use tracing::info;

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let capacity = payload.capacity.unwrap_or(20);
    if capacity < 1 {
        return Err(AppError::Validation("capacity must be at least 1".into()));
    }

    let bookable_hours = payload.bookable_hours.unwrap_or_default();
    for hours in &bookable_hours {
        let start = NaiveTime::parse_from_str(&hours.start, "%H:%M")
            .map_err(|_| AppError::Validation("Invalid bookable hours start (HH:MM)".into()))?;
        let end = NaiveTime::parse_from_str(&hours.end, "%H:%M")
            .map_err(|_| AppError::Validation("Invalid bookable hours end (HH:MM)".into()))?;
        if start >= end {
            return Err(AppError::Validation("Bookable hours start must be before end".into()));
        }
    }

    let nonbookable_periods = payload.nonbookable_periods.unwrap_or_default();
    for period in &nonbookable_periods {
        let start = NaiveDateTime::parse_from_str(&period.start_dt, "%Y-%m-%dT%H:%M:%S")
            .map_err(|_| AppError::Validation("Invalid non-bookable period start".into()))?;
        let end = NaiveDateTime::parse_from_str(&period.end_dt, "%Y-%m-%dT%H:%M:%S")
            .map_err(|_| AppError::Validation("Invalid non-bookable period end".into()))?;
        if start >= end {
            return Err(AppError::Validation("Non-bookable period start must be before end".into()));
        }
    }

    let room = Room::new(NewRoomParams {
        name: payload.name,
        building: payload.building,
        floor: payload.floor,
        number: payload.number,
        capacity,
        is_reservable: payload.is_reservable.unwrap_or(true),
        reservations_need_confirmation: payload.reservations_need_confirmation.unwrap_or(false),
        bookable_hours,
        nonbookable_periods,
    });

    let created = state.room_repo.create(&room).await?;
    info!("Room created: {} ({})", created.id, created.full_name());
    Ok(Json(created))
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list().await?;
    Ok(Json(rooms))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;
    Ok(Json(room))
}
