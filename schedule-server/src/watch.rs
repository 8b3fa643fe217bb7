//! Re-evaluation of the displayed departure.
//!
//! A display shows the next departure for one selected stop. It is
//! recomputed when the selection changes and on a periodic tick, so the
//! answer stays right as the clock moves on. Both triggers feed the same
//! lookup.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::domain::DayCategory;
use crate::resolver::{DepartureResult, ResolveError, resolve_next_departure};
use crate::timetable::Timetable;

/// How often a display should re-evaluate without user interaction.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Something that should cause the display to be recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The user picked a different stop (empty means none).
    StopChanged(String),
    /// The refresh timer fired.
    Tick,
}

/// What the display should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Show this new result.
    Updated(DepartureResult),
    /// Keep showing what is already there.
    Unchanged,
    /// The timetable has nothing for this day; the display is left as is.
    Unavailable(DayCategory),
}

/// Transient display state: the selected stop and what is shown for it.
#[derive(Debug, Clone, Default)]
pub struct DepartureWatch {
    selected: String,
    displayed: Option<(String, DepartureResult)>,
}

impl DepartureWatch {
    /// A watch with no stop selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected stop, empty if none.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// The result currently on display, if any.
    pub fn displayed(&self) -> Option<&DepartureResult> {
        self.displayed.as_ref().map(|(_, result)| result)
    }

    /// Apply an event and recompute.
    pub fn handle(
        &mut self,
        event: WatchEvent,
        timetable: Option<&Timetable>,
        now: NaiveDateTime,
    ) -> WatchOutcome {
        if let WatchEvent::StopChanged(stop) = event {
            self.selected = stop.trim().to_string();
        }

        match resolve_next_departure(timetable, &self.selected, now) {
            Ok(result) => {
                let same = self
                    .displayed
                    .as_ref()
                    .is_some_and(|(stop, shown)| *stop == self.selected && *shown == result);
                if same {
                    WatchOutcome::Unchanged
                } else {
                    self.displayed = Some((self.selected.clone(), result));
                    WatchOutcome::Updated(result)
                }
            }
            Err(ResolveError::NoSelection) => WatchOutcome::Unchanged,
            Err(ResolveError::DataUnavailable(day)) => WatchOutcome::Unavailable(day),
        }
    }
}
