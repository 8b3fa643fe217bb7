//! Full-day table view of the timetable.

use serde::Serialize;

use crate::domain::{DayCategory, StopId};

use super::{Slot, Timetable, UNSERVED_MARKER};

/// A day's trips laid out as rows, one column per stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableTable {
    pub day: DayCategory,

    /// Column headers: the stops of the day's first trip.
    pub columns: Vec<StopId>,

    /// One row per trip, in stored order, one cell per column.
    pub rows: Vec<Vec<String>>,
}

impl Timetable {
    /// Build the table for a category.
    ///
    /// Returns `None` if the category is missing or has no trips. Unserved
    /// stops show as `---`; malformed values are shown as written.
    pub fn table(&self, day: DayCategory) -> Option<TimetableTable> {
        let trips = self.trips(day)?;
        let columns: Vec<StopId> = trips.first()?.stops().cloned().collect();

        let rows = trips
            .iter()
            .map(|trip| {
                columns
                    .iter()
                    .map(|stop| match trip.slot(stop.as_str()) {
                        Some(Slot::Time(t)) => t.to_string(),
                        Some(Slot::Malformed(raw)) => raw.clone(),
                        Some(Slot::Unserved) | None => UNSERVED_MARKER.to_string(),
                    })
                    .collect()
            })
            .collect();

        Some(TimetableTable { day, columns, rows })
    }
}
