//! Service-day categories.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown day category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day category: {0:?}")]
pub struct InvalidDayCategory(pub String);

/// Which of the three weekly timetables applies on a given day.
///
/// Monday to Friday share one timetable; Saturday and Sunday each have
/// their own. The partition is fixed.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::DayCategory;
/// use chrono::Weekday;
///
/// assert_eq!(DayCategory::from_weekday(Weekday::Sun), DayCategory::Sunday);
/// assert_eq!(DayCategory::from_weekday(Weekday::Sat), DayCategory::Saturday);
/// assert_eq!(DayCategory::from_weekday(Weekday::Wed), DayCategory::Weekday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCategory {
    Weekday,
    Saturday,
    Sunday,
}

impl DayCategory {
    /// All categories, in display order.
    pub const ALL: [DayCategory; 3] = [
        DayCategory::Weekday,
        DayCategory::Saturday,
        DayCategory::Sunday,
    ];

    /// Select the category for a day of the week.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayCategory::Sunday,
            Weekday::Sat => DayCategory::Saturday,
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                DayCategory::Weekday
            }
        }
    }

    /// Select the category for any date-like value.
    pub fn for_date<D: Datelike>(date: &D) -> Self {
        Self::from_weekday(date.weekday())
    }

    /// Short identifier used in URLs and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayCategory::Weekday => "weekday",
            DayCategory::Saturday => "saturday",
            DayCategory::Sunday => "sunday",
        }
    }

    /// Top-level key of this category in the timetable document.
    pub fn source_key(&self) -> &'static str {
        match self {
            DayCategory::Weekday => "lunes_a_viernes",
            DayCategory::Saturday => "sabados",
            DayCategory::Sunday => "domingos",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DayCategory::Weekday => "Monday to Friday",
            DayCategory::Saturday => "Saturdays",
            DayCategory::Sunday => "Sundays",
        }
    }
}

impl FromStr for DayCategory {
    type Err = InvalidDayCategory;

    /// Accepts either the short identifier or the timetable document key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        DayCategory::ALL
            .into_iter()
            .find(|d| d.as_str() == needle || d.source_key() == needle)
            .ok_or_else(|| InvalidDayCategory(s.to_string()))
    }
}

impl fmt::Display for DayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
