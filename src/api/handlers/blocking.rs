use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateBlockingRequest;
use crate::domain::models::blocking::Blocking;
use crate::error::AppError;
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;

pub async fn create_blocking(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(payload): Json<CreateBlockingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let start_date = NaiveDate::parse_from_str(&payload.start_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start_date format".into()))?;
    let end_date = NaiveDate::parse_from_str(&payload.end_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid end_date format".into()))?;

    if end_date < start_date {
        return Err(AppError::Validation("end_date must not be before start_date".into()));
    }

    let blocking = Blocking::new(room.id.clone(), start_date, end_date, payload.reason);
    let created = state.blocking_repo.create(&blocking).await?;
    info!("Blocking created: {} for room {} ({} - {})", created.id, room.id, created.start_date, created.end_date);
    Ok(Json(created))
}

pub async fn list_blockings(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let blockings = state.blocking_repo.list_by_room(&room_id).await?;
    Ok(Json(blockings))
}
