use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::{max, min};
use std::collections::HashMap;

use crate::domain::models::blocking::Blocking;
use crate::domain::models::booking::Booking;
use crate::domain::models::room::Room;
use crate::domain::models::timeline::{
    BlockingEntry, HourWindow, Occurrence, Period, RoomTimeline, TimeSlot,
};
use crate::error::AppError;

pub fn expand_date_range(
    start: NaiveDate,
    end: NaiveDate,
    repeat: &str,
) -> Result<Vec<NaiveDate>, AppError> {
    if end < start {
        return Err(AppError::Validation("end_date must not be before start_date".to_string()));
    }

    let dates = match repeat {
        "single" => vec![start],
        "daily" => start.iter_days().take_while(|d| *d <= end).collect(),
        "weekly" => start.iter_weeks().take_while(|d| *d <= end).collect(),
        other => {
            return Err(AppError::Validation(format!("Unknown repeat type: {}", other)));
        }
    };

    Ok(dates)
}

pub fn probe_hour_bounds(probe: &TimeSlot) -> (u32, u32) {
    let min_hour = probe.start_time.hour();
    let mut max_hour = probe.end_time.hour();
    if probe.end_time.minute() > 0 || probe.end_time.second() > 0 {
        max_hour += 1;
    }
    (min_hour, max_hour)
}

pub fn unbookable_hours(bookable: &[(NaiveTime, NaiveTime)]) -> Vec<HourWindow> {
    // no windows means unrestricted, not fully unbookable
    if bookable.is_empty() {
        return Vec::new();
    }

    let mut windows: Vec<(NaiveTime, NaiveTime)> = bookable.to_vec();
    windows.sort();

    let day_end = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
    let mut gaps = Vec::new();
    let mut cursor = NaiveTime::MIN;

    for (start, end) in windows {
        if start > cursor {
            gaps.push(HourWindow { start_time: cursor, end_time: start });
        }
        cursor = max(cursor, end);
    }
    if cursor < day_end {
        gaps.push(HourWindow { start_time: cursor, end_time: day_end });
    }

    gaps
}

pub fn build_room_timeline(
    room: &Room,
    probe: &TimeSlot,
    date_range: &[NaiveDate],
    room_bookings: &[Booking],
    room_blockings: &[Blocking],
) -> RoomTimeline {
    let mut candidates = HashMap::new();
    let mut pre_bookings = HashMap::new();
    let mut bookings = HashMap::new();
    let mut conflicts = HashMap::new();
    let mut pre_conflicts = HashMap::new();
    let mut blockings = HashMap::new();
    let mut nonbookable = HashMap::new();

    let bookable: Vec<(NaiveTime, NaiveTime)> = room
        .bookable_hours()
        .iter()
        .filter_map(|h| {
            let start = NaiveTime::parse_from_str(&h.start, "%H:%M").ok()?;
            let end = NaiveTime::parse_from_str(&h.end, "%H:%M").ok()?;
            Some((start, end))
        })
        .collect();

    let periods: Vec<(NaiveDateTime, NaiveDateTime)> = room
        .nonbookable_periods()
        .iter()
        .filter_map(|p| {
            let start = NaiveDateTime::parse_from_str(&p.start_dt, "%Y-%m-%dT%H:%M:%S").ok()?;
            let end = NaiveDateTime::parse_from_str(&p.end_dt, "%Y-%m-%dT%H:%M:%S").ok()?;
            Some((start, end))
        })
        .collect();

    for &dt in date_range {
        candidates.insert(dt, vec![*probe]);

        let day_start = dt.and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        let probe_start = dt.and_time(probe.start_time);
        let probe_end = dt.and_time(probe.end_time);

        let mut day_bookings = Vec::new();
        let mut day_pre_bookings = Vec::new();
        let mut day_conflicts = Vec::new();
        let mut day_pre_conflicts = Vec::new();

        for booking in room_bookings {
            if booking.start_dt >= day_end || booking.end_dt <= day_start {
                continue;
            }

            let occurrence = Occurrence {
                start_dt: max(booking.start_dt, day_start),
                end_dt: min(booking.end_dt, day_end),
                booked_for: booking.booked_for.clone(),
                reason: booking.reason.clone(),
            };

            let overlap = if booking.start_dt < probe_end && booking.end_dt > probe_start {
                Some(TimeSlot {
                    start_time: max(booking.start_dt, probe_start).time(),
                    end_time: min(booking.end_dt, probe_end).time(),
                })
            } else {
                None
            };

            if booking.is_confirmed() {
                day_bookings.push(occurrence);
                if let Some(slot) = overlap {
                    day_conflicts.push(slot);
                }
            } else if booking.is_pending() {
                day_pre_bookings.push(occurrence);
                if let Some(slot) = overlap {
                    day_pre_conflicts.push(slot);
                }
            }
        }

        let day_blockings: Vec<BlockingEntry> = room_blockings
            .iter()
            .filter(|b| b.covers(dt))
            .map(|b| BlockingEntry { reason: b.reason.clone() })
            .collect();

        let day_periods: Vec<Period> = periods
            .iter()
            .filter(|(start, end)| *start < day_end && *end > day_start)
            .map(|&(start, end)| Period {
                start_dt: max(start, day_start),
                end_dt: min(end, day_end),
            })
            .collect();

        if !day_bookings.is_empty() {
            bookings.insert(dt, day_bookings);
        }
        if !day_pre_bookings.is_empty() {
            pre_bookings.insert(dt, day_pre_bookings);
        }
        if !day_conflicts.is_empty() {
            conflicts.insert(dt, day_conflicts);
        }
        if !day_pre_conflicts.is_empty() {
            pre_conflicts.insert(dt, day_pre_conflicts);
        }
        if !day_blockings.is_empty() {
            blockings.insert(dt, day_blockings);
        }
        if !day_periods.is_empty() {
            nonbookable.insert(dt, day_periods);
        }
    }

    RoomTimeline {
        room: room.clone(),
        candidates,
        pre_bookings,
        bookings,
        conflicts,
        pre_conflicts,
        blockings,
        nonbookable_periods: nonbookable,
        unbookable_hours: unbookable_hours(&bookable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{Booking, NewBookingParams};
    use crate::domain::models::room::{BookableHours, NewRoomParams, NonBookablePeriod};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn test_room() -> Room {
        Room::new(NewRoomParams {
            name: "Aquarium".to_string(),
            building: "500".to_string(),
            floor: "1".to_string(),
            number: "001".to_string(),
            capacity: 10,
            is_reservable: true,
            reservations_need_confirmation: false,
            bookable_hours: Vec::new(),
            nonbookable_periods: Vec::new(),
        })
    }

    fn booking(room: &Room, start: &str, end: &str, pending: bool) -> Booking {
        Booking::new(NewBookingParams {
            room_id: room.id.clone(),
            start_dt: dt(start),
            end_dt: dt(end),
            booked_for: "Ada".to_string(),
            reason: "meeting".to_string(),
            needs_confirmation: pending,
        })
    }

    #[test]
    fn test_expand_single() {
        let dates = expand_date_range(date("2019-03-04"), date("2019-03-20"), "single").unwrap();
        assert_eq!(dates, vec![date("2019-03-04")]);
    }

    #[test]
    fn test_expand_daily() {
        let dates = expand_date_range(date("2019-03-04"), date("2019-03-06"), "daily").unwrap();
        assert_eq!(dates, vec![date("2019-03-04"), date("2019-03-05"), date("2019-03-06")]);
    }

    #[test]
    fn test_expand_weekly() {
        let dates = expand_date_range(date("2019-03-04"), date("2019-03-19"), "weekly").unwrap();
        assert_eq!(dates, vec![date("2019-03-04"), date("2019-03-11"), date("2019-03-18")]);
    }

    #[test]
    fn test_expand_rejects_inverted_range() {
        assert!(expand_date_range(date("2019-03-04"), date("2019-03-03"), "daily").is_err());
    }

    #[test]
    fn test_expand_rejects_unknown_repeat() {
        assert!(expand_date_range(date("2019-03-04"), date("2019-03-05"), "monthly").is_err());
    }

    #[test]
    fn test_probe_hour_bounds_round_outward() {
        let exact = TimeSlot { start_time: time("09:00"), end_time: time("18:00") };
        assert_eq!(probe_hour_bounds(&exact), (9, 18));

        let ragged = TimeSlot { start_time: time("09:30"), end_time: time("17:45") };
        assert_eq!(probe_hour_bounds(&ragged), (9, 18));
    }

    #[test]
    fn test_unbookable_hours_complement() {
        assert!(unbookable_hours(&[]).is_empty());

        let gaps = unbookable_hours(&[(time("09:00"), time("12:00")), (time("14:00"), time("18:00"))]);
        assert_eq!(gaps.len(), 3);
        assert_eq!((gaps[0].start_time, gaps[0].end_time), (NaiveTime::MIN, time("09:00")));
        assert_eq!((gaps[1].start_time, gaps[1].end_time), (time("12:00"), time("14:00")));
        assert_eq!(gaps[2].start_time, time("18:00"));
    }

    #[test]
    fn test_candidates_cover_every_date() {
        let room = test_room();
        let probe = TimeSlot { start_time: time("09:00"), end_time: time("10:00") };
        let range = vec![date("2019-03-04"), date("2019-03-05")];

        let timeline = build_room_timeline(&room, &probe, &range, &[], &[]);

        assert_eq!(timeline.candidates.len(), 2);
        for d in &range {
            assert_eq!(timeline.candidates[d], vec![probe]);
        }
        assert!(timeline.bookings.is_empty());
        assert!(timeline.conflicts.is_empty());
    }

    #[test]
    fn test_confirmed_booking_becomes_occurrence_and_conflict() {
        let room = test_room();
        let probe = TimeSlot { start_time: time("09:00"), end_time: time("11:00") };
        let day = date("2019-03-04");

        let b = booking(&room, "2019-03-04 10:00", "2019-03-04 12:00", false);
        let timeline = build_room_timeline(&room, &probe, &[day], &[b], &[]);

        assert_eq!(timeline.bookings[&day].len(), 1);
        assert!(!timeline.pre_bookings.contains_key(&day));

        let conflict = &timeline.conflicts[&day][0];
        assert_eq!(conflict.start_time, time("10:00"));
        assert_eq!(conflict.end_time, time("11:00"));
    }

    #[test]
    fn test_pending_booking_becomes_pre_conflict() {
        let room = test_room();
        let probe = TimeSlot { start_time: time("09:00"), end_time: time("11:00") };
        let day = date("2019-03-04");

        let b = booking(&room, "2019-03-04 10:00", "2019-03-04 12:00", true);
        let timeline = build_room_timeline(&room, &probe, &[day], &[b], &[]);

        assert_eq!(timeline.pre_bookings[&day].len(), 1);
        assert_eq!(timeline.pre_conflicts[&day].len(), 1);
        assert!(!timeline.conflicts.contains_key(&day));
    }

    #[test]
    fn test_booking_outside_probe_is_no_conflict() {
        let room = test_room();
        let probe = TimeSlot { start_time: time("09:00"), end_time: time("10:00") };
        let day = date("2019-03-04");

        let b = booking(&room, "2019-03-04 14:00", "2019-03-04 15:00", false);
        let timeline = build_room_timeline(&room, &probe, &[day], &[b], &[]);

        assert_eq!(timeline.bookings[&day].len(), 1);
        assert!(!timeline.conflicts.contains_key(&day));
    }

    #[test]
    fn test_multi_day_booking_is_clipped_per_date() {
        let room = test_room();
        let probe = TimeSlot { start_time: time("09:00"), end_time: time("10:00") };
        let range = vec![date("2019-03-04"), date("2019-03-05")];

        let b = booking(&room, "2019-03-04 20:00", "2019-03-05 09:30", false);
        let timeline = build_room_timeline(&room, &probe, &range, &[b], &[]);

        let first = &timeline.bookings[&date("2019-03-04")][0];
        assert_eq!(first.start_dt, dt("2019-03-04 20:00"));
        assert_eq!(first.end_dt, dt("2019-03-05 00:00"));

        let second = &timeline.bookings[&date("2019-03-05")][0];
        assert_eq!(second.start_dt, dt("2019-03-05 00:00"));
        assert_eq!(second.end_dt, dt("2019-03-05 09:30"));

        // spills into the probe only on the second day
        assert!(!timeline.conflicts.contains_key(&date("2019-03-04")));
        assert_eq!(timeline.conflicts[&date("2019-03-05")][0].end_time, time("09:30"));
    }

    #[test]
    fn test_blockings_and_periods_attach_to_covered_dates() {
        let room = Room::new(NewRoomParams {
            name: "Pagoda".to_string(),
            building: "500".to_string(),
            floor: "2".to_string(),
            number: "002".to_string(),
            capacity: 4,
            is_reservable: true,
            reservations_need_confirmation: false,
            bookable_hours: vec![BookableHours { start: "08:00".to_string(), end: "20:00".to_string() }],
            nonbookable_periods: vec![NonBookablePeriod {
                start_dt: "2019-03-04T00:00:00".to_string(),
                end_dt: "2019-03-04T08:00:00".to_string(),
            }],
        });

        let probe = TimeSlot { start_time: time("09:00"), end_time: time("10:00") };
        let range = vec![date("2019-03-04"), date("2019-03-05")];
        let blocking = Blocking::new(
            room.id.clone(),
            date("2019-03-05"),
            date("2019-03-06"),
            "maintenance".to_string(),
        );

        let timeline = build_room_timeline(&room, &probe, &range, &[], &[blocking]);

        assert!(!timeline.blockings.contains_key(&date("2019-03-04")));
        assert_eq!(timeline.blockings[&date("2019-03-05")][0].reason, "maintenance");

        assert_eq!(timeline.nonbookable_periods[&date("2019-03-04")].len(), 1);
        assert!(!timeline.nonbookable_periods.contains_key(&date("2019-03-05")));

        assert_eq!(timeline.unbookable_hours.len(), 2);
        assert_eq!(timeline.unbookable_hours[0].end_time, time("08:00"));
        assert_eq!(timeline.unbookable_hours[1].start_time, time("20:00"));
    }
}
