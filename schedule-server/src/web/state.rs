//! Application state for the web layer.

use std::sync::Arc;

use crate::config::MapConfig;
use crate::timetable::{LoadError, Timetable};

/// The timetable as loaded at startup.
///
/// A failed load is kept as its message so every request can report it.
/// There is no retry.
#[derive(Clone)]
pub enum TimetableState {
    Loaded(Arc<Timetable>),
    Unavailable(Arc<str>),
}

impl TimetableState {
    /// The timetable, if it loaded.
    pub fn get(&self) -> Option<&Timetable> {
        match self {
            TimetableState::Loaded(tt) => Some(tt.as_ref()),
            TimetableState::Unavailable(_) => None,
        }
    }

    /// Why the timetable is missing, if it is.
    pub fn load_error(&self) -> Option<&str> {
        match self {
            TimetableState::Loaded(_) => None,
            TimetableState::Unavailable(message) => Some(message.as_ref()),
        }
    }
}

impl From<Result<Timetable, LoadError>> for TimetableState {
    fn from(result: Result<Timetable, LoadError>) -> Self {
        match result {
            Ok(tt) => TimetableState::Loaded(Arc::new(tt)),
            Err(e) => TimetableState::Unavailable(e.to_string().into()),
        }
    }
}

/// Shared application state.
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// The weekly timetable
    pub timetable: TimetableState,

    /// Map widget settings
    pub map: Arc<MapConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(timetable: TimetableState, map: MapConfig) -> Self {
        Self {
            timetable,
            map: Arc::new(map),
        }
    }
}
