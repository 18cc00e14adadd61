use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BookableHours {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NonBookablePeriod {
    pub start_dt: String,
    pub end_dt: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub building: String,
    pub floor: String,
    pub number: String,
    pub capacity: i32,
    pub is_reservable: bool,
    pub reservations_need_confirmation: bool,
    pub bookable_hours_json: String,
    pub nonbookable_periods_json: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewRoomParams {
    pub name: String,
    pub building: String,
    pub floor: String,
    pub number: String,
    pub capacity: i32,
    pub is_reservable: bool,
    pub reservations_need_confirmation: bool,
    pub bookable_hours: Vec<BookableHours>,
    pub nonbookable_periods: Vec<NonBookablePeriod>,
}

impl Room {
    pub fn new(params: NewRoomParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            building: params.building,
            floor: params.floor,
            number: params.number,
            capacity: params.capacity,
            is_reservable: params.is_reservable,
            reservations_need_confirmation: params.reservations_need_confirmation,
            bookable_hours_json: serde_json::to_string(&params.bookable_hours)
                .unwrap_or_else(|_| "[]".to_string()),
            nonbookable_periods_json: serde_json::to_string(&params.nonbookable_periods)
                .unwrap_or_else(|_| "[]".to_string()),
            created_at: Utc::now(),
        }
    }

    /// "building/floor-number (name)", the name part omitted when redundant.
    pub fn full_name(&self) -> String {
        let generated = format!("{}/{}-{}", self.building, self.floor, self.number);
        if self.name.is_empty() || self.name == generated {
            generated
        } else {
            format!("{} ({})", generated, self.name)
        }
    }

    pub fn bookable_hours(&self) -> Vec<BookableHours> {
        serde_json::from_str(&self.bookable_hours_json).unwrap_or_default()
    }

    pub fn nonbookable_periods(&self) -> Vec<NonBookablePeriod> {
        serde_json::from_str(&self.nonbookable_periods_json).unwrap_or_default()
    }
}
