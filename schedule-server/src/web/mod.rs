//! Web layer for the schedule viewer.
//!
//! Serves the map page, the next-departure panel and the day tables, as
//! HTML or JSON depending on the `Accept` header.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, TimetableState};
pub use templates::*;
