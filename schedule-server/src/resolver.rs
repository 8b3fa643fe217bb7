//! Next-departure lookup.
//!
//! Given a stop, the current time and the weekly timetable, picks the
//! service day's trip list and finds the first trip still to depart from
//! that stop.

use chrono::NaiveDateTime;

use crate::domain::{DayCategory, ServiceTime, minutes_of_day};
use crate::timetable::{Timetable, Trip};

/// Outcome of a next-departure lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartureResult {
    /// The next scheduled departure.
    Departure { time: ServiceTime, day: DayCategory },
    /// The last departure of the day has already gone.
    NoMoreService { day: DayCategory },
}

impl DepartureResult {
    /// The service day the lookup used.
    pub fn day(&self) -> DayCategory {
        match self {
            DepartureResult::Departure { day, .. } | DepartureResult::NoMoreService { day } => *day,
        }
    }

    /// The departure time, if there is one.
    pub fn time(&self) -> Option<ServiceTime> {
        match self {
            DepartureResult::Departure { time, .. } => Some(*time),
            DepartureResult::NoMoreService { .. } => None,
        }
    }
}

/// Reasons a lookup produces no result.
///
/// Neither is fatal: the caller keeps its previous display and tries again
/// on the next trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No stop has been chosen
    #[error("no stop selected")]
    NoSelection,

    /// The timetable is not loaded, or has no trips for the day
    #[error("no timetable data for {0}")]
    DataUnavailable(DayCategory),
}

/// Find the next departure from `stop` after `now`.
///
/// The service day is chosen from `now`'s weekday. Trips are scanned in
/// stored order and the first one whose departure is strictly later than
/// `now` (to the minute) wins. Departures before 04:00 count as the end of
/// the service day, so a 00:15 trip is later than a 23:50 one.
///
/// Unserved stops and malformed times are skipped. A stop the timetable
/// does not know simply has no departures.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_server::resolver::resolve_next_departure;
/// use schedule_server::timetable::Timetable;
///
/// let tt = Timetable::from_json_str(
///     r#"{"lunes_a_viernes": [{"Plaza": "07:50"}, {"Plaza": "08:27"}, {"Plaza": "09:00"}]}"#,
/// ).unwrap();
///
/// // A Tuesday
/// let now = NaiveDate::from_ymd_opt(2024, 3, 19).unwrap().and_hms_opt(8, 17, 0).unwrap();
/// let result = resolve_next_departure(Some(&tt), "Plaza", now).unwrap();
/// assert_eq!(result.time().unwrap().to_string(), "08:27");
/// ```
pub fn resolve_next_departure(
    timetable: Option<&Timetable>,
    stop: &str,
    now: NaiveDateTime,
) -> Result<DepartureResult, ResolveError> {
    let stop = stop.trim();
    if stop.is_empty() {
        return Err(ResolveError::NoSelection);
    }

    let day = DayCategory::for_date(&now);
    let trips = timetable
        .and_then(|tt| tt.trips(day))
        .ok_or(ResolveError::DataUnavailable(day))?;

    let result = match next_departure(trips, stop, minutes_of_day(&now)) {
        Some(time) => DepartureResult::Departure { time, day },
        None => DepartureResult::NoMoreService { day },
    };
    Ok(result)
}

/// The first departure in `trips` (stored order) whose service minutes
/// exceed `now_minutes`.
pub fn next_departure(trips: &[Trip], stop: &str, now_minutes: u32) -> Option<ServiceTime> {
    trips
        .iter()
        .filter_map(|trip| trip.departure(stop))
        .find(|time| time.service_minutes() > now_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    // 2024-03-17 is a Sunday.
    fn at(day_offset: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 17 + day_offset)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn sunday(h: u32, m: u32) -> NaiveDateTime {
        at(0, h, m)
    }

    fn tuesday(h: u32, m: u32) -> NaiveDateTime {
        at(2, h, m)
    }

    fn saturday(h: u32, m: u32) -> NaiveDateTime {
        at(6, h, m)
    }

    fn timetable(json: &str) -> Timetable {
        Timetable::from_json_str(json).unwrap()
    }

    fn departs(result: Result<DepartureResult, ResolveError>) -> String {
        result.unwrap().time().unwrap().to_string()
    }

    #[test]
    fn returns_next_trip() {
        let tt = timetable(
            r#"{"lunes_a_viernes": [{"Plaza": "07:50"}, {"Plaza": "08:27"}, {"Plaza": "09:00"}]}"#,
        );
        let result = resolve_next_departure(Some(&tt), "Plaza", tuesday(8, 17)).unwrap();
        assert_eq!(
            result,
            DepartureResult::Departure {
                time: ServiceTime::parse_hhmm("08:27").unwrap(),
                day: DayCategory::Weekday,
            }
        );
    }

    #[test]
    fn after_midnight_trip_is_late_evening_departure() {
        let tt = timetable(r#"{"lunes_a_viernes": [{"Plaza": "22:00"}, {"Plaza": "00:15"}]}"#);
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", tuesday(23, 10))),
            "00:15"
        );
    }

    #[test]
    fn after_midnight_sorts_after_23_50() {
        let tt = timetable(r#"{"lunes_a_viernes": [{"Plaza": "00:15"}, {"Plaza": "23:50"}]}"#);
        // 00:15 is listed first and still counts as later than 23:40
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", tuesday(23, 40))),
            "00:15"
        );
    }

    #[test]
    fn no_more_service_is_not_an_error() {
        let tt = timetable(
            r#"{
                "lunes_a_viernes": [{"Plaza": "12:00"}],
                "domingos": [{"Plaza": "08:00"}, {"Plaza": "09:30"}]
            }"#,
        );
        assert_eq!(
            resolve_next_departure(Some(&tt), "Plaza", sunday(10, 0)),
            Ok(DepartureResult::NoMoreService {
                day: DayCategory::Sunday
            })
        );
    }

    #[test]
    fn empty_stop_is_no_selection() {
        let tt = timetable(r#"{"lunes_a_viernes": [{"Plaza": "12:00"}]}"#);
        assert_eq!(
            resolve_next_departure(Some(&tt), "", tuesday(10, 0)),
            Err(ResolveError::NoSelection)
        );
        assert_eq!(
            resolve_next_departure(Some(&tt), "   ", tuesday(10, 0)),
            Err(ResolveError::NoSelection)
        );
        // Selection is checked before data availability
        assert_eq!(
            resolve_next_departure(None, "", tuesday(10, 0)),
            Err(ResolveError::NoSelection)
        );
    }

    #[test]
    fn stop_is_trimmed_before_lookup() {
        let tt = timetable(r#"{"lunes_a_viernes": [{"Plaza": "08:27"}]}"#);
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), " Plaza ", tuesday(8, 0))),
            "08:27"
        );
    }

    #[test]
    fn unserved_markers_are_skipped() {
        let tt = timetable(
            r#"{"lunes_a_viernes": [
                {"Plaza": "08:00"},
                {"Plaza": "---"},
                {"Plaza": null},
                {"Otra": "08:45"},
                {"Plaza": "09:10"}
            ]}"#,
        );
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", tuesday(8, 30))),
            "09:10"
        );
    }

    #[test]
    fn malformed_times_are_skipped() {
        let tt = timetable(r#"{"lunes_a_viernes": [{"Plaza": "9h00"}, {"Plaza": "09:30"}]}"#);
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", tuesday(8, 30))),
            "09:30"
        );
    }

    #[test]
    fn departure_at_current_minute_has_left() {
        let tt = timetable(r#"{"lunes_a_viernes": [{"Plaza": "08:27"}, {"Plaza": "08:40"}]}"#);
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", tuesday(8, 27))),
            "08:40"
        );
        // Seconds do not matter
        let almost = tuesday(8, 26).with_second(59).unwrap();
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", almost)),
            "08:27"
        );
    }

    #[test]
    fn first_qualifying_in_stored_order() {
        // Out of order on purpose: stored order wins over the earliest time
        let tt = timetable(
            r#"{"lunes_a_viernes": [{"Plaza": "07:00"}, {"Plaza": "10:00"}, {"Plaza": "09:00"}]}"#,
        );
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", tuesday(8, 0))),
            "10:00"
        );
    }

    #[test]
    fn day_category_selection() {
        let tt = timetable(
            r#"{
                "lunes_a_viernes": [{"Plaza": "12:00"}],
                "sabados": [{"Plaza": "12:10"}],
                "domingos": [{"Plaza": "12:20"}]
            }"#,
        );
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", sunday(9, 0))),
            "12:20"
        );
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", saturday(9, 0))),
            "12:10"
        );
        for offset in 1..=5 {
            let result = resolve_next_departure(Some(&tt), "Plaza", at(offset, 9, 0)).unwrap();
            assert_eq!(result.day(), DayCategory::Weekday);
            assert_eq!(result.time().unwrap().to_string(), "12:00");
        }
    }

    #[test]
    fn missing_timetable_or_category_is_unavailable() {
        assert_eq!(
            resolve_next_departure(None, "Plaza", tuesday(9, 0)),
            Err(ResolveError::DataUnavailable(DayCategory::Weekday))
        );

        let tt = timetable(r#"{"lunes_a_viernes": [{"Plaza": "12:00"}]}"#);
        assert_eq!(
            resolve_next_departure(Some(&tt), "Plaza", saturday(9, 0)),
            Err(ResolveError::DataUnavailable(DayCategory::Saturday))
        );
    }

    #[test]
    fn empty_category_is_no_more_service() {
        let tt = timetable(r#"{"lunes_a_viernes": [{"Plaza": "12:00"}], "sabados": []}"#);
        assert_eq!(
            resolve_next_departure(Some(&tt), "Plaza", saturday(9, 0)),
            Ok(DepartureResult::NoMoreService {
                day: DayCategory::Saturday
            })
        );
    }

    #[test]
    fn unknown_stop_has_no_departures() {
        let tt = timetable(r#"{"lunes_a_viernes": [{"Plaza": "12:00"}]}"#);
        assert_eq!(
            resolve_next_departure(Some(&tt), "Estadio", tuesday(9, 0)),
            Ok(DepartureResult::NoMoreService {
                day: DayCategory::Weekday
            })
        );
    }

    #[test]
    fn early_morning_now_still_sees_adjusted_trips() {
        // At 00:05 the 00:15 trip (1455) is still ahead, but so is 05:30,
        // which comes first in stored order.
        let tt = timetable(
            r#"{"lunes_a_viernes": [{"Plaza": "05:30"}, {"Plaza": "23:00"}, {"Plaza": "00:15"}]}"#,
        );
        assert_eq!(
            departs(resolve_next_departure(Some(&tt), "Plaza", tuesday(0, 5))),
            "05:30"
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(ResolveError::NoSelection.to_string(), "no stop selected");
        assert_eq!(
            ResolveError::DataUnavailable(DayCategory::Sunday).to_string(),
            "no timetable data for sunday"
        );
    }
}
