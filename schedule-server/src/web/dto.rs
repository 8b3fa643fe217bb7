//! Data transfer objects for web requests and responses.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{DayCategory, StopId};
use crate::resolver::DepartureResult;

/// Request for the next departure from a stop.
#[derive(Debug, Default, Deserialize)]
pub struct NextDepartureRequest {
    /// Selected stop; missing or empty means nothing is selected
    #[serde(default)]
    pub stop: Option<String>,

    /// Time to evaluate at, `YYYY-MM-DDTHH:MM` (defaults to now)
    pub at: Option<String>,
}

impl NextDepartureRequest {
    /// Parse the `at` override, if given.
    pub fn at(&self) -> Result<Option<NaiveDateTime>, chrono::ParseError> {
        self.at
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_at)
            .transpose()
    }
}

fn parse_at(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
}

/// Next-departure response.
///
/// Serializes as `{"time": "HH:MM", "day": ..}` or `{"none": true, "day": ..}`.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DepartureResponse {
    Departure { time: String, day: DayCategory },
    NoMoreService { none: bool, day: DayCategory },
}

impl From<DepartureResult> for DepartureResponse {
    fn from(result: DepartureResult) -> Self {
        match result {
            DepartureResult::Departure { time, day } => DepartureResponse::Departure {
                time: time.to_string(),
                day,
            },
            DepartureResult::NoMoreService { day } => {
                DepartureResponse::NoMoreService { none: true, day }
            }
        }
    }
}

/// Stop list response.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    /// Stop identifiers in timetable order
    pub stops: Vec<StopId>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
