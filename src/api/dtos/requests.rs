use crate::domain::models::room::{BookableHours, NonBookablePeriod};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub building: String,
    pub floor: String,
    pub number: String,
    pub capacity: Option<i32>,
    pub is_reservable: Option<bool>,
    pub reservations_need_confirmation: Option<bool>,
    pub bookable_hours: Option<Vec<BookableHours>>,
    pub nonbookable_periods: Option<Vec<NonBookablePeriod>>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub booked_for: String,
    pub reason: String,
}

#[derive(Deserialize)]
pub struct CreateBlockingRequest {
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}
