use anyhow::anyhow;
use axum::Router;
use tracing::{info, Level};

mod driver;
mod models;
mod routes;
mod state;
mod utils;

use crate::state::app_state::AppState;
use crate::utils::conf_helper::{get_cached_config, init_config_and_bind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let state = AppState::new();

    // === CONFIG + LISTENER ===
    let listener = init_config_and_bind().await.map_err(|e| anyhow!(e))?;

    let config = get_cached_config();

    info!(
        "{} listening on {}:{} (tick {} ms, sample step {} s)",
        config.name,
        config.connection.ip,
        config.connection.port,
        config.playback.tick_period_ms,
        config.playback.sample_step
    );

    let app = Router::new()
        .merge(routes::info_routes::health_routes())
        .merge(routes::data_routes::data_routes(state.clone()))
        .merge(routes::playback_routes::playback_routes(state));

    axum::serve(listener, app).await?;

    Ok(())
}
