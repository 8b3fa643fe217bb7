//! Terminal departure board.
//!
//! Usage: `departure-watch [STOP]`
//!
//! Shows the next departure for the stop and keeps it current. Type another
//! stop name on stdin to switch; an empty line keeps the current one.
//! Runs until killed, also when stdin is closed.

use chrono::Local;
use schedule_server::config::ServerConfig;
use schedule_server::resolver::DepartureResult;
use schedule_server::timetable::TimetableLoader;
use schedule_server::watch::{DepartureWatch, WatchEvent, WatchOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env()?;
    let loader = TimetableLoader::new(config.fetch_timeout())?;
    let timetable = loader.load(&config.timetable_source()).await?;

    let stops: Vec<String> = timetable.stops().iter().map(|s| s.to_string()).collect();
    info!("Stops: {}", stops.join(", "));

    let mut watch = DepartureWatch::new();
    let initial = std::env::args().nth(1).unwrap_or_default();
    report(
        watch.handle(
            WatchEvent::StopChanged(initial),
            Some(&timetable),
            Local::now().naive_local(),
        ),
        watch.selected(),
    );

    let mut interval = tokio::time::interval(config.refresh_interval());
    interval.tick().await; // First tick is immediate, skip it
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        let event = tokio::select! {
            _ = interval.tick() => WatchEvent::Tick,
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) if !line.trim().is_empty() => WatchEvent::StopChanged(line),
                Some(_) => continue,
                // No more input; keep refreshing the current stop
                None => {
                    stdin_open = false;
                    continue;
                }
            },
        };

        if let WatchEvent::StopChanged(stop) = &event {
            if !timetable.has_stop(stop.trim()) {
                warn!(stop = stop.trim(), "unknown stop");
            }
        }

        let outcome = watch.handle(event, Some(&timetable), Local::now().naive_local());
        report(outcome, watch.selected());
    }
}

fn report(outcome: WatchOutcome, stop: &str) {
    match outcome {
        WatchOutcome::Updated(DepartureResult::Departure { time, day }) => {
            info!("{stop}: next departure {time} ({})", day.label());
        }
        WatchOutcome::Updated(DepartureResult::NoMoreService { day }) => {
            info!("{stop}: no more service today ({})", day.label());
        }
        WatchOutcome::Unavailable(day) => {
            warn!("no timetable data for {}", day.label());
        }
        WatchOutcome::Unchanged => {}
    }
}
