//! In-memory timetable model.
//!
//! The timetable document maps each service-day category to an ordered
//! list of trips; each trip maps stop identifiers to a departure time, or
//! to nothing when the trip does not serve that stop. The model is loaded
//! once and never mutated.

mod lint;
pub mod loader;
mod table;

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::domain::{DayCategory, ServiceTime, StopId};

pub use lint::ShapeIssue;
pub use loader::{LoadError, TimetableLoader, TimetableSource};
pub use table::TimetableTable;

/// Placeholder the timetable uses for a stop a trip does not serve.
pub const UNSERVED_MARKER: &str = "---";

/// The value of one stop in one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Scheduled departure.
    Time(ServiceTime),
    /// The trip does not serve this stop (`null`, `""` or `"---"`).
    Unserved,
    /// Anything else; kept verbatim for display.
    Malformed(String),
}

impl Slot {
    /// Classify a raw JSON value.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Slot::Unserved,
            serde_json::Value::String(s) => Slot::parse(s),
            other => Slot::Malformed(other.to_string()),
        }
    }

    /// Classify a raw time string.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == UNSERVED_MARKER {
            return Slot::Unserved;
        }
        match ServiceTime::parse_hhmm(trimmed) {
            Ok(time) => Slot::Time(time),
            Err(_) => Slot::Malformed(s.to_string()),
        }
    }

    /// The departure time, if this slot holds a valid one.
    pub fn time(&self) -> Option<ServiceTime> {
        match self {
            Slot::Time(t) => Some(*t),
            Slot::Unserved | Slot::Malformed(_) => None,
        }
    }
}

/// One scheduled run of the line.
///
/// Stops are kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trip {
    slots: Vec<(StopId, Slot)>,
}

impl Trip {
    /// Create a trip from `(stop, slot)` pairs in order.
    pub fn new(slots: Vec<(StopId, Slot)>) -> Self {
        Self { slots }
    }

    /// The slot for a stop. `None` if the trip has no such key.
    pub fn slot(&self, stop: &str) -> Option<&Slot> {
        self.slots
            .iter()
            .find(|(id, _)| id.as_str() == stop)
            .map(|(_, slot)| slot)
    }

    /// The departure time at a stop, if the trip serves it.
    pub fn departure(&self, stop: &str) -> Option<ServiceTime> {
        self.slot(stop).and_then(Slot::time)
    }

    /// Stop identifiers in document order.
    pub fn stops(&self) -> impl Iterator<Item = &StopId> {
        self.slots.iter().map(|(id, _)| id)
    }

    /// All `(stop, slot)` pairs in document order.
    pub fn slots(&self) -> &[(StopId, Slot)] {
        &self.slots
    }
}

impl<'de> Deserialize<'de> for Trip {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TripVisitor;

        impl<'de> Visitor<'de> for TripVisitor {
            type Value = Trip;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping stop names to departure times")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Trip, A::Error> {
                let mut slots = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((stop, value)) = map.next_entry::<StopId, serde_json::Value>()? {
                    let slot = Slot::from_json(&value);
                    // A repeated key keeps its first position and its last value
                    match slots.iter_mut().find(|(id, _)| *id == stop) {
                        Some((_, existing)) => *existing = slot,
                        None => slots.push((stop, slot)),
                    }
                }
                Ok(Trip { slots })
            }
        }

        deserializer.deserialize_map(TripVisitor)
    }
}

/// The weekly timetable: one ordered trip list per service-day category.
///
/// A category missing from the document is `None`, which is distinct from
/// a category present with no trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Timetable {
    #[serde(rename = "lunes_a_viernes", default)]
    weekday: Option<Vec<Trip>>,

    #[serde(rename = "sabados", default)]
    saturday: Option<Vec<Trip>>,

    #[serde(rename = "domingos", default)]
    sunday: Option<Vec<Trip>>,
}

impl Timetable {
    /// Parse a timetable document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Parse a timetable document from a string.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Set the trips for a category.
    pub fn with_trips(mut self, day: DayCategory, trips: Vec<Trip>) -> Self {
        *self.category_mut(day) = Some(trips);
        self
    }

    fn category_mut(&mut self, day: DayCategory) -> &mut Option<Vec<Trip>> {
        match day {
            DayCategory::Weekday => &mut self.weekday,
            DayCategory::Saturday => &mut self.saturday,
            DayCategory::Sunday => &mut self.sunday,
        }
    }

    /// Trips for a category, in stored order. `None` if the category is
    /// missing from the document.
    pub fn trips(&self, day: DayCategory) -> Option<&[Trip]> {
        match day {
            DayCategory::Weekday => self.weekday.as_deref(),
            DayCategory::Saturday => self.saturday.as_deref(),
            DayCategory::Sunday => self.sunday.as_deref(),
        }
    }

    /// The valid stop identifiers: the keys of the first weekday trip.
    pub fn stops(&self) -> Vec<StopId> {
        self.trips(DayCategory::Weekday)
            .and_then(|trips| trips.first())
            .map(|trip| trip.stops().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `stop` is one of the timetable's stop identifiers.
    pub fn has_stop(&self, stop: &str) -> bool {
        self.trips(DayCategory::Weekday)
            .and_then(|trips| trips.first())
            .is_some_and(|trip| trip.slot(stop).is_some())
    }

    /// Total number of trips across all categories.
    pub fn trip_count(&self) -> usize {
        DayCategory::ALL
            .into_iter()
            .filter_map(|day| self.trips(day))
            .map(<[Trip]>::len)
            .sum()
    }
}

/// Summary counts for logging and the API.
#[derive(Debug, Clone, Serialize)]
pub struct TimetableSummary {
    pub stops: usize,
    pub weekday_trips: Option<usize>,
    pub saturday_trips: Option<usize>,
    pub sunday_trips: Option<usize>,
}

impl From<&Timetable> for TimetableSummary {
    fn from(timetable: &Timetable) -> Self {
        Self {
            stops: timetable.stops().len(),
            weekday_trips: timetable.trips(DayCategory::Weekday).map(<[Trip]>::len),
            saturday_trips: timetable.trips(DayCategory::Saturday).map(<[Trip]>::len),
            sunday_trips: timetable.trips(DayCategory::Sunday).map(<[Trip]>::len),
        }
    }
}
