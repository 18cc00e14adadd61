use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::NaiveDateTime;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("INSERT INTO bookings (id, room_id, start_dt, end_dt, booked_for, reason, status, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *")
            .bind(&booking.id).bind(&booking.room_id).bind(booking.start_dt).bind(booking.end_dt)
            .bind(&booking.booked_for).bind(&booking.reason).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE room_id = $1 ORDER BY start_dt ASC").bind(room_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE start_dt < $1 AND end_dt > $2 AND status != 'CANCELLED' ORDER BY start_dt ASC").bind(end).bind(start).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn count_overlap(&self, room_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE room_id = $1 AND start_dt < $2 AND end_dt > $3 AND status = 'CONFIRMED'").bind(room_id).bind(end).bind(start).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
}
