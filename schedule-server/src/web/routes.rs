//! HTTP route handlers.

use std::path::Path as FsPath;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, error, warn};

use crate::domain::DayCategory;
use crate::resolver::{ResolveError, resolve_next_departure};
use crate::timetable::Timetable;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Day shown when the page first loads.
const DEFAULT_DAY: DayCategory = DayCategory::Weekday;

/// Create the application router.
///
/// `static_dir` holds the static assets; `route_kml` is the route overlay
/// served to the map.
pub fn create_router(state: AppState, static_dir: &FsPath, route_kml: &FsPath) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/api/map", get(map_config))
        .route("/next", get(next_departure))
        .route("/timetable/:day", get(timetable_day))
        .route_service("/route.kml", ServeFile::new(route_kml))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with map, stop selector and the default day's table.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (stops, table) = match state.timetable.get() {
        Some(tt) => (
            tt.stops().iter().map(|s| s.to_string()).collect(),
            TableView::new(DEFAULT_DAY, tt.table(DEFAULT_DAY)),
        ),
        None => (
            Vec::new(),
            TableView::message(DEFAULT_DAY, "Timetable unavailable."),
        ),
    };

    let template = IndexTemplate {
        stops,
        load_error: state.timetable.load_error().map(str::to_string),
        map: (*state.map).clone(),
        days: DayTab::all(DEFAULT_DAY),
        table,
    };
    render(&template).map(Html)
}

/// List the stop identifiers.
async fn list_stops(State(state): State<AppState>) -> Result<Json<StopsResponse>, AppError> {
    let tt = loaded(&state)?;
    Ok(Json(StopsResponse { stops: tt.stops() }))
}

/// Map widget settings.
async fn map_config(State(state): State<AppState>) -> Json<crate::config::MapConfig> {
    Json((*state.map).clone())
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Next departure from the selected stop.
///
/// Nothing selected answers 204 so the caller keeps its current display.
async fn next_departure(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<NextDepartureRequest>,
) -> Result<Response, AppError> {
    let now = req
        .at()
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid time {:?}: {}", req.at.as_deref().unwrap_or(""), e),
        })?
        .unwrap_or_else(|| Local::now().naive_local());
    let stop = req.stop.as_deref().unwrap_or("").trim();

    let result = match resolve_next_departure(state.timetable.get(), stop, now) {
        Ok(result) => result,
        Err(ResolveError::NoSelection) => return Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e @ ResolveError::DataUnavailable(_)) => return Err(unavailable(&state, e)),
    };
    debug!(stop, %now, ?result, "resolved next departure");

    if accepts_html(&headers) {
        let template = NextDepartureTemplate {
            next: NextDepartureView::from_result(stop, &result),
        };
        Ok(Html(render(&template)?).into_response())
    } else {
        Ok(Json(DepartureResponse::from(result)).into_response())
    }
}

/// The full timetable for one day.
async fn timetable_day(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(day): Path<String>,
) -> Result<Response, AppError> {
    let day: DayCategory = day.parse().map_err(|e| AppError::BadRequest {
        message: format!("{}", e),
    })?;
    let tt = loaded(&state)?;
    let table = tt.table(day);

    if accepts_html(&headers) {
        let template = TimetableFragmentTemplate {
            table: TableView::new(day, table),
        };
        Ok(Html(render(&template)?).into_response())
    } else {
        let table = table.ok_or_else(|| AppError::NotFound {
            message: format!("No timetable data for {}", day),
        })?;
        Ok(Json(table).into_response())
    }
}

fn loaded(state: &AppState) -> Result<&Timetable, AppError> {
    state.timetable.get().ok_or_else(|| AppError::Unavailable {
        message: unavailable_message(state, None),
    })
}

fn unavailable(state: &AppState, e: ResolveError) -> AppError {
    AppError::Unavailable {
        message: unavailable_message(state, Some(e)),
    }
}

fn unavailable_message(state: &AppState, e: Option<ResolveError>) -> String {
    match (state.timetable.load_error(), e) {
        (Some(load_error), _) => format!("Timetable unavailable: {}", load_error),
        (None, Some(e)) => capitalize(&e.to_string()),
        (None, None) => "Timetable unavailable".to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render<T: Template>(template: &T) -> Result<String, AppError> {
    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
