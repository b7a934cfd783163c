use serde::{Deserialize, Serialize};
use trajectory_reader::core::constants::{
    DEFAULT_DELIMITER, SAMPLE_STEP, TICK_PERIOD_MS, UNIT_RATIO,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub id: String,
    pub version: String,
    pub connection: Connection,
    pub playback: PlaybackConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Trajectory Player".to_string(),
            id: "trajectory_player".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            connection: Connection::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    pub ip: String,
    pub port: u16,
}

impl Default for Connection {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 0,
        }
    }
}

/// Tick period and sample step drive different consumers and are never
/// derived from each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub tick_period_ms: u64,
    pub unit_ratio: f64,
    pub sample_step: f64,
    pub delimiter: char,
    pub strict_width: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: TICK_PERIOD_MS,
            unit_ratio: UNIT_RATIO,
            sample_step: SAMPLE_STEP,
            delimiter: DEFAULT_DELIMITER as char,
            strict_width: true,
        }
    }
}
