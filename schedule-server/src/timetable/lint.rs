//! Shape checks for a loaded timetable.
//!
//! Lookups tolerate malformed data by skipping it. These checks report it
//! so the problems show up in the logs at load time.

use crate::domain::{DayCategory, StopId};

use super::{Slot, Timetable};

/// A data-shape problem found in a timetable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeIssue {
    /// The document has no list for this category
    #[error("no trips listed for {0}")]
    MissingCategory(DayCategory),

    /// A trip lacks one of the stop identifiers
    #[error("{day} trip {trip} has no entry for stop {stop}")]
    MissingStop {
        day: DayCategory,
        trip: usize,
        stop: StopId,
    },

    /// A trip names a stop that is not a known stop identifier
    #[error("{day} trip {trip} lists unknown stop {stop}")]
    UnknownStop {
        day: DayCategory,
        trip: usize,
        stop: StopId,
    },

    /// A time value that is neither a time nor an unserved marker
    #[error("{day} trip {trip} has malformed time {value:?} at stop {stop}")]
    MalformedTime {
        day: DayCategory,
        trip: usize,
        stop: StopId,
        value: String,
    },
}

impl Timetable {
    /// Check every trip against the stop identifiers of the first weekday
    /// trip. Trip numbers in the report are 1-based.
    pub fn lint(&self) -> Vec<ShapeIssue> {
        let stops = self.stops();
        let mut issues = Vec::new();

        for day in DayCategory::ALL {
            let Some(trips) = self.trips(day) else {
                issues.push(ShapeIssue::MissingCategory(day));
                continue;
            };

            for (i, trip) in trips.iter().enumerate() {
                let trip_no = i + 1;

                for stop in &stops {
                    if trip.slot(stop.as_str()).is_none() {
                        issues.push(ShapeIssue::MissingStop {
                            day,
                            trip: trip_no,
                            stop: stop.clone(),
                        });
                    }
                }

                for (stop, slot) in trip.slots() {
                    if !stops.contains(stop) {
                        issues.push(ShapeIssue::UnknownStop {
                            day,
                            trip: trip_no,
                            stop: stop.clone(),
                        });
                    }
                    if let Slot::Malformed(value) = slot {
                        issues.push(ShapeIssue::MalformedTime {
                            day,
                            trip: trip_no,
                            stop: stop.clone(),
                            value: value.clone(),
                        });
                    }
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_timetable_has_no_issues() {
        let tt = Timetable::from_json_str(
            r#"{
                "lunes_a_viernes": [{"A": "07:00", "B": null}],
                "sabados": [{"A": "---", "B": "08:00"}],
                "domingos": []
            }"#,
        )
        .unwrap();
        assert!(tt.lint().is_empty());
    }

    #[test]
    fn reports_each_problem() {
        let tt = Timetable::from_json_str(
            r#"{
                "lunes_a_viernes": [
                    {"A": "07:00", "B": "07:10"},
                    {"A": "7h30", "C": "07:45"}
                ],
                "domingos": []
            }"#,
        )
        .unwrap();

        let issues = tt.lint();
        assert_eq!(
            issues,
            vec![
                ShapeIssue::MissingStop {
                    day: DayCategory::Weekday,
                    trip: 2,
                    stop: StopId::new("B"),
                },
                ShapeIssue::MalformedTime {
                    day: DayCategory::Weekday,
                    trip: 2,
                    stop: StopId::new("A"),
                    value: "7h30".into(),
                },
                ShapeIssue::UnknownStop {
                    day: DayCategory::Weekday,
                    trip: 2,
                    stop: StopId::new("C"),
                },
                ShapeIssue::MissingCategory(DayCategory::Saturday),
            ]
        );
    }

    #[test]
    fn issue_display() {
        let issue = ShapeIssue::MalformedTime {
            day: DayCategory::Sunday,
            trip: 3,
            stop: StopId::new("Plaza"),
            value: "25:00".into(),
        };
        assert_eq!(
            issue.to_string(),
            "sunday trip 3 has malformed time \"25:00\" at stop Plaza"
        );
        assert_eq!(
            ShapeIssue::MissingCategory(DayCategory::Saturday).to_string(),
            "no trips listed for saturday"
        );
    }
}
