//! Domain types for the schedule viewer.
//!
//! These types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod day;
mod stop;
mod time;

pub use day::{DayCategory, InvalidDayCategory};
pub use stop::StopId;
pub use time::{
    MINUTES_PER_DAY, SERVICE_DAY_START_HOUR, ServiceTime, TimeError, minutes_of_day,
};
