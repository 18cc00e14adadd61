use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Blocking {
    pub id: String,
    pub room_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl Blocking {
    pub fn new(room_id: String, start_date: NaiveDate, end_date: NaiveDate, reason: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            room_id,
            start_date,
            end_date,
            reason,
            created_at: Utc::now(),
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
