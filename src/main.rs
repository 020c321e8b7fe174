/// Main application entry point
use launch_tracker::clients::LaunchClient;
use launch_tracker::config::AppConfig;
use launch_tracker::handlers::AppState;
use launch_tracker::routes::build_router;
use launch_tracker::services::{PreviousService, UpcomingService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize page controllers
    let upcoming = Arc::new(UpcomingService::new(
        LaunchClient::new(config.api_base_url.clone())?,
        config.page_url.clone(),
    ));
    let previous = Arc::new(PreviousService::new(
        LaunchClient::new(config.api_base_url.clone())?,
        config.page_url.clone(),
    ));

    // Initialize application state
    let state = AppState {
        upcoming: upcoming.clone(),
        previous,
    };

    // Start background tasks
    start_background_tasks(&config, upcoming);

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("launch_tracker service listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Keep the upcoming collection warm on the page's refresh cadence. The
/// loop reissues the fetch on its interval regardless of whether a prior
/// cycle is still outstanding; stale responses lose the generation race.
fn start_background_tasks(config: &AppConfig, upcoming: Arc<UpcomingService>) {
    let interval = config.refresh_every_seconds;
    tokio::spawn(async move {
        info!("Starting upcoming-launch refresh task (interval: {}s)", interval);
        loop {
            if let Err(e) = upcoming.refresh().await {
                error!("Upcoming refresh error: {:?}", e);
            }
            tokio::time::sleep(Duration::from_secs(interval)).await;
        }
    });
}
