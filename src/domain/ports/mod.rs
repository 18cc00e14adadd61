use crate::domain::models::{room::Room, booking::Booking, blocking::Blocking};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &Room) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError>;
    async fn list(&self) -> Result<Vec<Room>, AppError>;
    async fn list_reservable(&self) -> Result<Vec<Room>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_by_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Booking>, AppError>;
    async fn count_overlap(&self, room_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Result<i64, AppError>;
}

#[async_trait]
pub trait BlockingRepository: Send + Sync {
    async fn create(&self, blocking: &Blocking) -> Result<Blocking, AppError>;
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Blocking>, AppError>;
    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Blocking>, AppError>;
    async fn find_covering(&self, room_id: &str, date: NaiveDate) -> Result<Vec<Blocking>, AppError>;
}
