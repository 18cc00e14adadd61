use crate::domain::{models::blocking::Blocking, ports::BlockingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

pub struct PostgresBlockingRepo {
    pool: PgPool,
}

impl PostgresBlockingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockingRepository for PostgresBlockingRepo {
    async fn create(&self, blocking: &Blocking) -> Result<Blocking, AppError> {
        sqlx::query_as::<_, Blocking>("INSERT INTO blockings (id, room_id, start_date, end_date, reason, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *")
            .bind(&blocking.id).bind(&blocking.room_id).bind(blocking.start_date)
            .bind(blocking.end_date).bind(&blocking.reason).bind(blocking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Blocking>, AppError> {
        sqlx::query_as::<_, Blocking>("SELECT * FROM blockings WHERE room_id = $1 ORDER BY start_date ASC").bind(room_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Blocking>, AppError> {
        sqlx::query_as::<_, Blocking>("SELECT * FROM blockings WHERE start_date <= $1 AND end_date >= $2 ORDER BY start_date ASC").bind(end).bind(start).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_covering(&self, room_id: &str, date: NaiveDate) -> Result<Vec<Blocking>, AppError> {
        sqlx::query_as::<_, Blocking>("SELECT * FROM blockings WHERE room_id = $1 AND start_date <= $2 AND end_date >= $3").bind(room_id).bind(date).bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
