//! One-shot timetable loading from a file or a URL.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{Timetable, TimetableSummary};

/// Errors that can occur while loading the timetable.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading a local file failed
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    /// Document is not a valid timetable
    #[error("invalid timetable JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the timetable document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimetableSource {
    Path(PathBuf),
    Url(String),
}

impl TimetableSource {
    /// Interpret a location string: `http://` and `https://` are URLs,
    /// anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            TimetableSource::Url(location.to_string())
        } else {
            TimetableSource::Path(PathBuf::from(location))
        }
    }
}

impl fmt::Display for TimetableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableSource::Path(path) => write!(f, "{}", path.display()),
            TimetableSource::Url(url) => f.write_str(url),
        }
    }
}

/// Loads the timetable document.
#[derive(Debug, Clone)]
pub struct TimetableLoader {
    http: reqwest::Client,
}

impl TimetableLoader {
    /// Create a loader whose URL fetches give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Fetch and parse the timetable.
    ///
    /// Shape problems do not fail the load; each one is logged as a
    /// warning.
    pub async fn load(&self, source: &TimetableSource) -> Result<Timetable, LoadError> {
        let bytes = match source {
            TimetableSource::Path(path) => {
                tokio::fs::read(path).await.map_err(|e| LoadError::Io {
                    path: path.clone(),
                    source: e,
                })?
            }
            TimetableSource::Url(url) => self.fetch(url).await?,
        };
        debug!(bytes = bytes.len(), %source, "read timetable document");

        let timetable = Timetable::from_json_slice(&bytes)?;

        for issue in timetable.lint() {
            warn!(%issue, "timetable data problem");
        }

        let summary = TimetableSummary::from(&timetable);
        info!(
            %source,
            stops = summary.stops,
            weekday_trips = ?summary.weekday_trips,
            saturday_trips = ?summary.saturday_trips,
            sunday_trips = ?summary.sunday_trips,
            "loaded timetable"
        );

        Ok(timetable)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
