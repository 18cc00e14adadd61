use axum::{extract::{Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::domain::models::timeline::{TimeSlot, TimelineProps};
use crate::domain::services::availability::{build_room_timeline, expand_date_range, probe_hour_bounds};
use crate::domain::services::timeline::{build_payload, TimelineSelection};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{Days, NaiveDate, NaiveTime};
use tracing::info;

pub async fn get_timeline(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let start_str = params.get("start_date").ok_or(AppError::Validation("start_date required".into()))?;
    let start_date = NaiveDate::parse_from_str(start_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start_date format".into()))?;

    let end_date = match params.get("end_date") {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid end_date format".into()))?,
        None => start_date,
    };

    let repeat = params.get("repeat").map(String::as_str).unwrap_or("single");

    let start_time_str = params.get("start_time").ok_or(AppError::Validation("start_time required".into()))?;
    let end_time_str = params.get("end_time").ok_or(AppError::Validation("end_time required".into()))?;
    let start_time = NaiveTime::parse_from_str(start_time_str, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid start_time format (HH:MM)".into()))?;
    let end_time = NaiveTime::parse_from_str(end_time_str, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid end_time format (HH:MM)".into()))?;

    if start_time >= end_time {
        return Err(AppError::Validation("start_time must be before end_time".into()));
    }

    // the client's previous selection, reconciled against the new range below
    let previous_active = match params.get("active_date") {
        Some(s) => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid active_date format".into()))?),
        None => None,
    };

    let date_range = expand_date_range(start_date, end_date, repeat)?;

    // an explicit id list keeps its order, otherwise every reservable room
    let rooms = match params.get("rooms") {
        Some(csv) => {
            let mut rooms = Vec::new();
            for id in csv.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let room = state.room_repo.find_by_id(id).await?
                    .ok_or_else(|| AppError::NotFound(format!("Room not found: {}", id)))?;
                rooms.push(room);
            }
            rooms
        }
        None => state.room_repo.list_reservable().await?,
    };

    let probe = TimeSlot { start_time, end_time };
    let (min_hour, max_hour) = probe_hour_bounds(&probe);

    // one window fetch for all rooms, grouped in memory
    let last_date = date_range.last().copied().unwrap_or(start_date);
    let window_start = start_date.and_time(NaiveTime::MIN);
    let window_end = last_date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::Validation("Date out of range".into()))?
        .and_time(NaiveTime::MIN);

    let bookings = state.booking_repo.list_by_range(window_start, window_end).await?;
    let blockings = state.blocking_repo.list_by_range(start_date, last_date).await?;

    let mut availability = Vec::with_capacity(rooms.len());
    for room in &rooms {
        let room_bookings: Vec<_> = bookings.iter().filter(|b| b.room_id == room.id).cloned().collect();
        let room_blockings: Vec<_> = blockings.iter().filter(|b| b.room_id == room.id).cloned().collect();
        availability.push(build_room_timeline(room, &probe, &date_range, &room_bookings, &room_blockings));
    }

    let mut selection = TimelineSelection { active_date: previous_active };
    selection.sync(&date_range);

    let props = TimelineProps {
        availability,
        date_range,
        min_hour,
        max_hour,
        is_fetching: false,
        is_fetching_rooms: false,
        recurrence_type: repeat.to_string(),
    };

    info!("timeline: {} room(s) over {} date(s), repeat={}", rooms.len(), props.date_range.len(), repeat);

    Ok(Json(build_payload(&props, &selection)))
}
