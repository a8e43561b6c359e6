use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinema_booking::{
    build_router,
    config::{Config, LogFormat},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let filter = EnvFilter::try_new(&config.app.rust_log)?;
    match config.app.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    info!("Starting CinemaBook API ({})", config.app.environment);

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port).parse()?;
    let sweep_interval = Duration::from_secs(config.seat_map.sweep_interval_seconds);

    let app_state = AppState::connect(config).await?;
    info!("Admin tables stored in {}", app_state.store.backend_name());

    // --- Background tasks ---

    // Discard seat maps nobody has touched for a while
    let sweeper_state = app_state.clone();
    task::spawn(async move {
        loop {
            tokio::time::sleep(sweep_interval).await;
            sweeper_state.sessions.sweep_idle(Instant::now()).await;
        }
    });

    // --- Web server ---

    let app = build_router(app_state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
