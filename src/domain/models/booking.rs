use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub booked_for: String,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub room_id: String,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub booked_for: String,
    pub reason: String,
    pub needs_confirmation: bool,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        // Rooms that require confirmation get a pre-booking instead of a
        // confirmed reservation.
        let status = if params.needs_confirmation { "PENDING" } else { "CONFIRMED" };

        Self {
            id: Uuid::new_v4().to_string(),
            room_id: params.room_id,
            start_dt: params.start_dt,
            end_dt: params.end_dt,
            booked_for: params.booked_for,
            reason: params.reason,
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == "CONFIRMED"
    }

    pub fn is_pending(&self) -> bool {
        self.status == "PENDING"
    }
}
