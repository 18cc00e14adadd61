use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashMap;

use super::room::Room;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct TimeSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub bookable: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Occurrence {
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub booked_for: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BlockingEntry {
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Period {
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct HourWindow {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

// per-date maps are sparse; only candidates cover every date of the range
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoomTimeline {
    pub room: Room,
    pub candidates: HashMap<NaiveDate, Vec<TimeSlot>>,
    pub pre_bookings: HashMap<NaiveDate, Vec<Occurrence>>,
    pub bookings: HashMap<NaiveDate, Vec<Occurrence>>,
    pub conflicts: HashMap<NaiveDate, Vec<TimeSlot>>,
    pub pre_conflicts: HashMap<NaiveDate, Vec<TimeSlot>>,
    pub blockings: HashMap<NaiveDate, Vec<BlockingEntry>>,
    pub nonbookable_periods: HashMap<NaiveDate, Vec<Period>>,
    pub unbookable_hours: Vec<HourWindow>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RowAvailability {
    pub candidates: Vec<Candidate>,
    pub pre_bookings: Vec<Occurrence>,
    pub bookings: Vec<Occurrence>,
    pub conflicts: Vec<TimeSlot>,
    pub pre_conflicts: Vec<TimeSlot>,
    pub blockings: Vec<BlockingEntry>,
    pub nonbookable_periods: Vec<Period>,
    pub unbookable_hours: Vec<HourWindow>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimelineRow {
    pub availability: RowAvailability,
    pub label: String,
    pub key: String,
    pub conflict_indicator: bool,
    pub booking_url: String,
    pub room: Room,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LegendLabel {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl LegendLabel {
    pub fn colored(label: &str, color: &str) -> Self {
        Self { label: label.to_string(), color: Some(color.to_string()), style: None }
    }

    pub fn styled(label: &str, style: &str) -> Self {
        Self { label: label.to_string(), color: None, style: Some(style.to_string()) }
    }
}

#[derive(Debug, Clone)]
pub struct TimelineProps {
    pub availability: Vec<RoomTimeline>,
    pub date_range: Vec<NaiveDate>,
    pub min_hour: u32,
    pub max_hour: u32,
    pub is_fetching: bool,
    pub is_fetching_rooms: bool,
    pub recurrence_type: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct TimelinePayload {
    pub rows: Vec<TimelineRow>,
    pub legend_labels: Vec<LegendLabel>,
    pub empty_message: String,
    pub date_range: Vec<NaiveDate>,
    pub min_hour: u32,
    pub max_hour: u32,
    pub active_date: NaiveDate,
    pub is_loading: bool,
    pub recurrence_type: String,
    pub disable_date_picker: bool,
    pub extra_content: Option<String>,
}
