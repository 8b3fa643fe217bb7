//! Transit schedule viewer.
//!
//! Shows a bus line on a map, and answers "when is the next bus from this
//! stop?" from a static weekly timetable.

pub mod config;
pub mod domain;
pub mod resolver;
pub mod timetable;
pub mod watch;
pub mod web;
