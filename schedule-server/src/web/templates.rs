//! Askama templates for the web frontend.

use askama::Template;

use crate::config::MapConfig;
use crate::domain::DayCategory;
use crate::resolver::DepartureResult;
use crate::timetable::TimetableTable;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page: map, stop selector, next departure and the day table.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stops: Vec<String>,
    pub load_error: Option<String>,
    pub map: MapConfig,
    pub days: Vec<DayTab>,
    pub table: TableView,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Timetable table fragment for one day.
#[derive(Template)]
#[template(path = "timetable_table.html")]
pub struct TimetableFragmentTemplate {
    pub table: TableView,
}

/// Next-departure panel fragment.
#[derive(Template)]
#[template(path = "next_departure.html")]
pub struct NextDepartureTemplate {
    pub next: NextDepartureView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A day selector button.
#[derive(Debug, Clone)]
pub struct DayTab {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

impl DayTab {
    /// One tab per category, with `active` selected.
    pub fn all(active: DayCategory) -> Vec<Self> {
        DayCategory::ALL
            .into_iter()
            .map(|day| DayTab {
                key: day.as_str(),
                label: day.label(),
                active: day == active,
            })
            .collect()
    }
}

/// Timetable table view model.
#[derive(Debug, Clone)]
pub struct TableView {
    pub day_label: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,

    /// Shown instead of the table when there is nothing to list.
    pub message: Option<String>,
}

impl TableView {
    /// Message shown for a day with no trips.
    pub const NO_DATA: &'static str = "No timetable data for this day.";

    /// Create from a built table, or the empty-day message.
    pub fn new(day: DayCategory, table: Option<TimetableTable>) -> Self {
        match table {
            Some(table) => Self {
                day_label: day.label().to_string(),
                columns: table.columns.iter().map(|c| c.to_string()).collect(),
                rows: table.rows,
                message: None,
            },
            None => Self::message(day, Self::NO_DATA),
        }
    }

    /// A table view that only shows a message.
    pub fn message(day: DayCategory, message: impl Into<String>) -> Self {
        Self {
            day_label: day.label().to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// Next-departure panel view model.
#[derive(Debug, Clone)]
pub struct NextDepartureView {
    pub stop: String,
    pub day_label: String,

    /// Departure time, absent when service is over for the day.
    pub time: Option<String>,

    /// Status line under the time.
    pub status: String,
}

impl NextDepartureView {
    /// Create from a lookup result.
    pub fn from_result(stop: &str, result: &DepartureResult) -> Self {
        let day_label = result.day().label().to_string();
        match result.time() {
            Some(time) => Self {
                stop: stop.to_string(),
                day_label,
                time: Some(time.to_string()),
                status: format!("Next departure from {}", stop),
            },
            None => Self {
                stop: stop.to_string(),
                day_label,
                time: None,
                status: "No more service today".to_string(),
            },
        }
    }

    /// The time to display.
    pub fn display_time(&self) -> &str {
        self.time.as_deref().unwrap_or("--:--")
    }

    /// Whether service has ended for the day.
    pub fn is_finished(&self) -> bool {
        self.time.is_none()
    }
}
