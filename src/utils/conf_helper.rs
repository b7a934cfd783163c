use std::sync::OnceLock;
use tokio::fs;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::models::player_model::PlayerConfig;

static CONFIG_CACHE: OnceLock<PlayerConfig> = OnceLock::new();

const CONFIG_ENV: &str = "TRAJECTORY_PLAYER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "player.json";

async fn load_config(file_path: &str) -> Result<PlayerConfig, String> {
    match fs::read_to_string(file_path).await {
        Ok(data) => {
            serde_json::from_str(&data).map_err(|e| format!("JSON Parse Error: {e} {file_path}"))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found, using built-in defaults", file_path);
            Ok(PlayerConfig::default())
        }
        Err(e) => Err(format!("File read Error: {e} {file_path}")),
    }
}

pub async fn init_config_and_bind() -> Result<TcpListener, String> {
    let file_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = load_config(&file_path).await?;

    if config.playback.tick_period_ms == 0 {
        return Err("playback.tick_period_ms must be positive".to_string());
    }
    if !config.playback.delimiter.is_ascii() {
        return Err(format!(
            "playback.delimiter must be ASCII, got {:?}",
            config.playback.delimiter
        ));
    }

    let bind_addr = format!("{}:{}", config.connection.ip, config.connection.port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("Bind failed: {e}"))?;

    let actual_port = listener
        .local_addr()
        .map_err(|e| format!("Addr error: {e}"))?
        .port();

    // port 0 asks the OS for one; publish the real port
    config.connection.port = actual_port;

    CONFIG_CACHE
        .set(config)
        .map_err(|_| "Config already initialized".to_string())?;

    info!("Config initialized from {} with port {}", file_path, actual_port);

    Ok(listener)
}

pub fn get_cached_config() -> &'static PlayerConfig {
    CONFIG_CACHE.get_or_init(PlayerConfig::default)
}
