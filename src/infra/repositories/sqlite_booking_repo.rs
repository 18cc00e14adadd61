use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqlitePool, Row};
use chrono::NaiveDateTime;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, room_id, start_dt, end_dt, booked_for, reason, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.room_id).bind(booking.start_dt).bind(booking.end_dt)
            .bind(&booking.booked_for).bind(&booking.reason).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE room_id = ? ORDER BY start_dt ASC").bind(room_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE start_dt < ? AND end_dt > ? AND status != 'CANCELLED' ORDER BY start_dt ASC").bind(end).bind(start).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn count_overlap(&self, room_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE room_id = ? AND start_dt < ? AND end_dt > ? AND status = 'CONFIRMED'").bind(room_id).bind(end).bind(start).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
}
