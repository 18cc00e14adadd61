use std::sync::Arc;
use crate::domain::ports::{BlockingRepository, BookingRepository, RoomRepository};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub room_repo: Arc<dyn RoomRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub blocking_repo: Arc<dyn BlockingRepository>,
}
