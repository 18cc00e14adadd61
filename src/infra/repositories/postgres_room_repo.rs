use crate::domain::{models::room::Room, ports::RoomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresRoomRepo {
    pool: PgPool,
}

impl PostgresRoomRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepo {
    async fn create(&self, room: &Room) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            r#"INSERT INTO rooms (id, name, building, floor, number, capacity, is_reservable, reservations_need_confirmation, bookable_hours_json, nonbookable_periods_json, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING *"#
        )
            .bind(&room.id)
            .bind(&room.name)
            .bind(&room.building)
            .bind(&room.floor)
            .bind(&room.number)
            .bind(room.capacity)
            .bind(room.is_reservable)
            .bind(room.reservations_need_confirmation)
            .bind(&room.bookable_hours_json)
            .bind(&room.nonbookable_periods_json)
            .bind(room.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY building, floor, number, name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_reservable(&self) -> Result<Vec<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE is_reservable = TRUE ORDER BY building, floor, number, name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
