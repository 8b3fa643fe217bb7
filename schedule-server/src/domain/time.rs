//! Timetable time handling.
//!
//! Timetables list departures as "HH:MM" strings on a 24-hour clock. A
//! service day runs past midnight: departures before 04:00 belong to the
//! tail of the current service day, not to the start of the next one.

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Departures before this hour are treated as running after the rest of
/// the day's trips.
pub const SERVICE_DAY_START_HOUR: u32 = 4;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A scheduled departure time within a service day.
///
/// Ordering follows the service day rather than the clock: `00:15` sorts
/// after `23:50`, because the early-morning trip is the last run of the
/// night.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::ServiceTime;
///
/// let late = ServiceTime::parse_hhmm("23:50").unwrap();
/// let night = ServiceTime::parse_hhmm("00:15").unwrap();
/// assert!(night > late);
/// assert_eq!(night.to_string(), "00:15");
/// assert_eq!(night.service_minutes(), 1455);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceTime(NaiveTime);

impl ServiceTime {
    /// Create a time from hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// A single-digit hour ("7:05") is accepted; minutes must always have
    /// two digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::ServiceTime;
    ///
    /// assert!(ServiceTime::parse_hhmm("00:00").is_ok());
    /// assert!(ServiceTime::parse_hhmm("23:59").is_ok());
    /// assert!(ServiceTime::parse_hhmm("7:05").is_ok());
    ///
    /// assert!(ServiceTime::parse_hhmm("0705").is_err());
    /// assert!(ServiceTime::parse_hhmm("07:5").is_err());
    /// assert!(ServiceTime::parse_hhmm("24:00").is_err());
    /// assert!(ServiceTime::parse_hhmm("---").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let (hour_part, minute_part) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        let hour = match hour_part.as_bytes() {
            [d] => parse_digit(*d),
            [d1, d2] => parse_digit(*d1).zip(parse_digit(*d2)).map(|(a, b)| a * 10 + b),
            _ => None,
        }
        .ok_or_else(|| TimeError::new("invalid hour digits"))?;

        let minute = match minute_part.as_bytes() {
            [d1, d2] => parse_digit(*d1).zip(parse_digit(*d2)).map(|(a, b)| a * 10 + b),
            _ => None,
        }
        .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::from_hm(hour, minute)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the underlying clock time.
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Minutes since midnight on the clock, without any adjustment.
    pub fn minutes_since_midnight(&self) -> u32 {
        minutes_of_day(&self.0)
    }

    /// Whether this departure runs after midnight, at the end of the
    /// service day.
    pub fn is_after_midnight(&self) -> bool {
        self.hour() < SERVICE_DAY_START_HOUR
    }

    /// Minutes into the service day.
    ///
    /// Equal to [`minutes_since_midnight`](Self::minutes_since_midnight),
    /// plus a full day for departures before 04:00.
    pub fn service_minutes(&self) -> u32 {
        let minutes = self.minutes_since_midnight();
        if self.is_after_midnight() {
            minutes + MINUTES_PER_DAY
        } else {
            minutes
        }
    }
}

/// Minutes since midnight for any clock value, ignoring seconds.
pub fn minutes_of_day<T: Timelike>(t: &T) -> u32 {
    t.hour() * 60 + t.minute()
}

fn parse_digit(b: u8) -> Option<u32> {
    (b as char).to_digit(10)
}

impl Ord for ServiceTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.service_minutes().cmp(&other.service_minutes())
    }
}

impl PartialOrd for ServiceTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ServiceTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    proptest! {
        /// Any valid HH:MM string parses successfully
        #[test]
        fn valid_hhmm_parses(time_str in valid_time()) {
            prop_assert!(ServiceTime::parse_hhmm(&time_str).is_ok());
        }

        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(time_str in valid_time()) {
            let parsed = ServiceTime::parse_hhmm(&time_str).unwrap();
            prop_assert_eq!(parsed.to_string(), time_str);
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ServiceTime::parse_hhmm(&s).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ServiceTime::parse_hhmm(&s).is_err());
        }

        /// Adjusted minutes stay within the service day window
        #[test]
        fn service_minutes_in_window(hour in 0u32..24, minute in 0u32..60) {
            let time = ServiceTime::from_hm(hour, minute).unwrap();
            let m = time.service_minutes();
            prop_assert!(m >= SERVICE_DAY_START_HOUR * 60);
            prop_assert!(m < MINUTES_PER_DAY + SERVICE_DAY_START_HOUR * 60);
        }

        /// Ordering agrees with adjusted minutes
        #[test]
        fn ordering_consistent(
            h1 in 0u32..24, m1 in 0u32..60,
            h2 in 0u32..24, m2 in 0u32..60,
        ) {
            let a = ServiceTime::from_hm(h1, m1).unwrap();
            let b = ServiceTime::from_hm(h2, m2).unwrap();
            prop_assert_eq!(a.cmp(&b), a.service_minutes().cmp(&b.service_minutes()));
        }
    }
}
