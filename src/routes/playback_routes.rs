use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use serde::Serialize;
use tokio::time::Duration;
use tracing::{debug, info};

use trajectory_reader::{PlaybackState, Position};

use crate::routes::data_routes::{error_response, status_for};
use crate::routes::ws_handler::handle_ws_stream;
use crate::state::app_state::AppState;
use crate::utils::conf_helper::get_cached_config;

#[derive(Serialize)]
pub struct PlaybackStatus {
    #[serde(flatten)]
    pub state: PlaybackState,
    pub samples: usize,
    pub position: Option<Position>,
}

pub fn playback_routes(state: AppState) -> Router {
    Router::new()
        .route("/playback/start", post(start))
        .route("/playback/stop", post(stop))
        .route("/playback/state", get(status))
        .route("/playback/stream", get(stream))
        .with_state(state)
}

async fn start(State(state): State<AppState>) -> Response {
    let period = Duration::from_millis(get_cached_config().playback.tick_period_ms);

    match state.start_playback(period).await {
        Ok(true) => info!("Playback ticker running every {:?}", period),
        Ok(false) => debug!("Start ignored, playback already running"),
        Err(e) => return error_response(status_for(&e), e),
    }

    Json(snapshot(&state).await).into_response()
}

async fn stop(State(state): State<AppState>) -> Json<PlaybackStatus> {
    if state.stop_playback().await {
        info!("Playback cancelled");
    }

    Json(snapshot(&state).await)
}

async fn status(State(state): State<AppState>) -> Json<PlaybackStatus> {
    Json(snapshot(&state).await)
}

async fn stream(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    let events = state.events.subscribe();
    ws.on_upgrade(move |socket| handle_ws_stream(socket, events))
}

async fn snapshot(state: &AppState) -> PlaybackStatus {
    let engine = state.engine.lock().await;
    PlaybackStatus {
        state: engine.state(),
        samples: engine.len(),
        position: engine.current_position(),
    }
}
