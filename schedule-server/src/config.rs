//! Server configuration.
//!
//! Every setting has a default; environment variables override them.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::timetable::TimetableSource;
use crate::watch::REFRESH_INTERVAL;

/// Error returned when an environment override is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Settings handed to the browser map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    /// Initial map center latitude.
    pub center_lat: f64,

    /// Initial map center longitude.
    pub center_lon: f64,

    /// Initial zoom level.
    pub zoom: u8,

    /// Tile URL template.
    pub tile_url: String,

    /// Attribution shown on the map.
    pub attribution: String,

    /// How often the page refreshes the next departure (seconds).
    pub refresh_secs: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // First stop of the line
            center_lat: -33.651248,
            center_lon: -65.450809,
            zoom: 14,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
            refresh_secs: REFRESH_INTERVAL.as_secs(),
        }
    }
}

/// Configuration for the schedule server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,

    /// Timetable location: a file path or an http(s) URL.
    pub timetable: String,

    /// KML file with the route overlay.
    pub route_kml: PathBuf,

    /// Directory of static assets.
    pub static_dir: PathBuf,

    /// Timeout for fetching the timetable over HTTP (seconds).
    pub fetch_timeout_secs: u64,

    /// Map widget settings.
    pub map: MapConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            timetable: "horarios.json".to_string(),
            route_kml: PathBuf::from("recorrido.kml"),
            static_dir: PathBuf::from("static"),
            fetch_timeout_secs: 30,
            map: MapConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `SCHEDULE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = parse_var(&lookup, "SCHEDULE_BIND")? {
            config.bind = bind;
        }
        if let Some(timetable) = lookup("SCHEDULE_TIMETABLE") {
            config.timetable = timetable;
        }
        if let Some(kml) = lookup("SCHEDULE_ROUTE_KML") {
            config.route_kml = PathBuf::from(kml);
        }
        if let Some(dir) = lookup("SCHEDULE_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(secs) = parse_var(&lookup, "SCHEDULE_FETCH_TIMEOUT_SECS")? {
            config.fetch_timeout_secs = positive("SCHEDULE_FETCH_TIMEOUT_SECS", secs)?;
        }
        if let Some(lat) = parse_var::<f64, _>(&lookup, "SCHEDULE_MAP_LAT")? {
            config.map.center_lat = in_range("SCHEDULE_MAP_LAT", lat, -90.0, 90.0)?;
        }
        if let Some(lon) = parse_var::<f64, _>(&lookup, "SCHEDULE_MAP_LON")? {
            config.map.center_lon = in_range("SCHEDULE_MAP_LON", lon, -180.0, 180.0)?;
        }
        if let Some(zoom) = parse_var::<u8, _>(&lookup, "SCHEDULE_MAP_ZOOM")? {
            if zoom > 19 {
                return Err(ConfigError {
                    var: "SCHEDULE_MAP_ZOOM",
                    value: zoom.to_string(),
                    reason: "zoom must be 0-19".to_string(),
                });
            }
            config.map.zoom = zoom;
        }
        if let Some(secs) = parse_var(&lookup, "SCHEDULE_REFRESH_SECS")? {
            config.map.refresh_secs = positive("SCHEDULE_REFRESH_SECS", secs)?;
        }

        Ok(config)
    }

    /// Where to load the timetable from.
    pub fn timetable_source(&self) -> TimetableSource {
        TimetableSource::parse(&self.timetable)
    }

    /// Returns the fetch timeout as a Duration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Returns the refresh interval as a Duration.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.map.refresh_secs)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value.trim().parse().map(Some).map_err(|e: T::Err| ConfigError {
        var,
        reason: e.to_string(),
        value,
    })
}

fn positive(var: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError {
            var,
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

fn in_range(var: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ConfigError> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError {
            var,
            value: value.to_string(),
            reason: format!("must be between {min} and {max}"),
        });
    }
    Ok(value)
}
