use axum::extract::ws::{Message, WebSocket};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{error, info, warn};

use crate::driver::ticker::PlaybackMessage;

/// Forwards playback messages to one render client until it disconnects.
/// A client that falls behind skips the missed positions.
pub async fn handle_ws_stream(mut socket: WebSocket, mut events: broadcast::Receiver<PlaybackMessage>) {
    info!("playback stream opened");

    loop {
        let message = match events.recv().await {
            Ok(m) => m,
            Err(RecvError::Lagged(skipped)) => {
                warn!("stream client lagged, skipped {} positions", skipped);
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let json = match serde_json::to_string(&message) {
            Ok(j) => j,
            Err(e) => {
                error!("json serialize error: {}", e);
                return;
            }
        };

        if let Err(e) = socket.send(Message::Text(json.into())).await {
            warn!("ws send failed: {}", e);
            return;
        }
    }

    info!("playback stream closed");
}
