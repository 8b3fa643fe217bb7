use schedule_server::config::ServerConfig;
use schedule_server::timetable::TimetableLoader;
use schedule_server::web::{AppState, TimetableState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env()?;

    // Loaded once; a failure is shown to users rather than retried
    let source = config.timetable_source();
    let loader = TimetableLoader::new(config.fetch_timeout())?;
    let timetable = loader.load(&source).await;
    if let Err(e) = &timetable {
        error!(%source, "failed to load timetable: {e}");
    }

    let state = AppState::new(TimetableState::from(timetable), config.map.clone());
    let app = create_router(state, &config.static_dir, &config.route_kml);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Schedule viewer listening on http://{}", config.bind);
    info!("  GET  /                 - Map and timetable");
    info!("  GET  /health           - Health check");
    info!("  GET  /api/stops        - Stop list");
    info!("  GET  /next?stop=       - Next departure");
    info!("  GET  /timetable/:day   - Full timetable for a day");

    axum::serve(listener, app).await?;
    Ok(())
}
