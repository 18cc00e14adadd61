use chrono::NaiveDate;

use crate::domain::models::room::Room;
use crate::domain::models::timeline::{
    Candidate, LegendLabel, RoomTimeline, RowAvailability, TimelinePayload, TimelineProps,
    TimelineRow,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const EMPTY_MESSAGE: &str = "There are no rooms matching the criteria.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineSelection {
    pub active_date: Option<NaiveDate>,
}

impl TimelineSelection {
    pub fn sync(&mut self, date_range: &[NaiveDate]) {
        self.active_date = reconcile(self.active_date, date_range);
    }

    // trusted as given; the next sync re-validates it
    pub fn pick(&mut self, date: NaiveDate) {
        self.active_date = Some(date);
    }
}

pub fn reconcile(previous: Option<NaiveDate>, date_range: &[NaiveDate]) -> Option<NaiveDate> {
    if date_range.is_empty() {
        return previous;
    }

    match previous {
        Some(date) if date_range.contains(&date) => Some(date),
        _ => date_range.first().copied(),
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RowLayout<'a> {
    SingleRoom(&'a RoomTimeline),
    MultiRoom,
}

pub fn row_layout(availability: &[RoomTimeline]) -> RowLayout<'_> {
    match availability {
        [only] => RowLayout::SingleRoom(only),
        _ => RowLayout::MultiRoom,
    }
}

pub fn single_room(availability: &[RoomTimeline]) -> Option<&RoomTimeline> {
    match row_layout(availability) {
        RowLayout::SingleRoom(timeline) => Some(timeline),
        RowLayout::MultiRoom => None,
    }
}

pub fn derive_rows(
    availability: &[RoomTimeline],
    date_range: &[NaiveDate],
    active_date: Option<NaiveDate>,
) -> Vec<TimelineRow> {
    match row_layout(availability) {
        RowLayout::SingleRoom(timeline) => date_range
            .iter()
            .map(|&dt| {
                let formatted = dt.format(DATE_FORMAT).to_string();
                extract_row(timeline, dt, formatted.clone(), formatted)
            })
            .collect(),
        RowLayout::MultiRoom => {
            let Some(dt) = active_date else {
                return Vec::new();
            };
            availability
                .iter()
                .map(|timeline| {
                    extract_row(timeline, dt, timeline.room.full_name(), timeline.room.id.clone())
                })
                .collect()
        }
    }
}

fn extract_row(timeline: &RoomTimeline, dt: NaiveDate, label: String, key: String) -> TimelineRow {
    let has_conflicts = timeline.conflicts.get(&dt).is_some_and(|c| !c.is_empty());

    let availability = RowAvailability {
        candidates: timeline
            .candidates
            .get(&dt)
            .map(|slots| {
                slots
                    .iter()
                    .map(|slot| Candidate {
                        start_time: slot.start_time,
                        end_time: slot.end_time,
                        bookable: !has_conflicts,
                    })
                    .collect()
            })
            .unwrap_or_default(),
        pre_bookings: timeline.pre_bookings.get(&dt).cloned().unwrap_or_default(),
        bookings: timeline.bookings.get(&dt).cloned().unwrap_or_default(),
        conflicts: timeline.conflicts.get(&dt).cloned().unwrap_or_default(),
        pre_conflicts: timeline.pre_conflicts.get(&dt).cloned().unwrap_or_default(),
        blockings: timeline.blockings.get(&dt).cloned().unwrap_or_default(),
        nonbookable_periods: timeline.nonbookable_periods.get(&dt).cloned().unwrap_or_default(),
        unbookable_hours: timeline.unbookable_hours.clone(),
    };

    TimelineRow {
        availability,
        label,
        key,
        conflict_indicator: true,
        booking_url: booking_confirm_path(&timeline.room),
        room: timeline.room.clone(),
    }
}

pub fn booking_confirm_path(room: &Room) -> String {
    format!("/book/{}/confirm", room.id)
}

pub fn legend_labels() -> Vec<LegendLabel> {
    vec![
        LegendLabel::colored("Available", "green"),
        LegendLabel::colored("Booked", "orange"),
        LegendLabel::styled("Pre-Booking", "pre-booking"),
        LegendLabel::colored("Conflict", "red"),
        LegendLabel::styled("Conflict with Pre-Booking", "pre-booking-conflict"),
        LegendLabel::styled("Blocked", "blocking"),
        LegendLabel::styled("Not bookable", "unbookable"),
    ]
}

pub fn build_payload(props: &TimelineProps, selection: &TimelineSelection) -> Option<TimelinePayload> {
    // no date is active briefly when the view is opened from a direct link
    let active_date = selection.active_date?;

    let layout = row_layout(&props.availability);
    let rows = derive_rows(&props.availability, &props.date_range, Some(active_date));
    let extra_content = match layout {
        RowLayout::SingleRoom(timeline) => {
            Some(format!("Availability for room {}", timeline.room.full_name()))
        }
        RowLayout::MultiRoom => None,
    };

    Some(TimelinePayload {
        rows,
        legend_labels: legend_labels(),
        empty_message: EMPTY_MESSAGE.to_string(),
        date_range: props.date_range.clone(),
        min_hour: props.min_hour,
        max_hour: props.max_hour,
        active_date,
        is_loading: props.is_fetching || props.is_fetching_rooms,
        recurrence_type: props.recurrence_type.clone(),
        disable_date_picker: matches!(layout, RowLayout::SingleRoom(_)),
        extra_content,
    })
}
