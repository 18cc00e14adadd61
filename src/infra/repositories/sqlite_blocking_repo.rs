use crate::domain::{models::blocking::Blocking, ports::BlockingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::NaiveDate;

pub struct SqliteBlockingRepo {
    pool: SqlitePool,
}

impl SqliteBlockingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockingRepository for SqliteBlockingRepo {
    async fn create(&self, blocking: &Blocking) -> Result<Blocking, AppError> {
        sqlx::query_as::<_, Blocking>(
            "INSERT INTO blockings (id, room_id, start_date, end_date, reason, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&blocking.id).bind(&blocking.room_id).bind(blocking.start_date)
            .bind(blocking.end_date).bind(&blocking.reason).bind(blocking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Blocking>, AppError> {
        sqlx::query_as::<_, Blocking>("SELECT * FROM blockings WHERE room_id = ? ORDER BY start_date ASC").bind(room_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Blocking>, AppError> {
        sqlx::query_as::<_, Blocking>("SELECT * FROM blockings WHERE start_date <= ? AND end_date >= ? ORDER BY start_date ASC").bind(end).bind(start).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_covering(&self, room_id: &str, date: NaiveDate) -> Result<Vec<Blocking>, AppError> {
        sqlx::query_as::<_, Blocking>("SELECT * FROM blockings WHERE room_id = ? AND start_date <= ? AND end_date >= ?").bind(room_id).bind(date).bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
