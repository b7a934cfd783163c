use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Duration;

use trajectory_reader::{PlaybackEngine, RecordingInfo, Result, SampleSequence, ScaledSampleSequence};

use crate::driver::ticker::{self, PlaybackMessage};

const EVENT_CAPACITY: usize = 256;

/// The file currently loaded. Charts read the unscaled samples; the engine
/// holds its own scaled copy.
#[derive(Clone)]
pub struct LoadedRecording {
    pub session_id: String,
    pub info: RecordingInfo,
    pub samples: Arc<SampleSequence>,
    pub unknown_fields: usize,
}

/// Every change to the engine's running flag happens while the ticker slot
/// is locked, so a running engine always has exactly one live ticker.
/// Lock order: `ticker`, then `engine`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Mutex<PlaybackEngine>>,
    pub recording: Arc<RwLock<Option<LoadedRecording>>>,
    pub events: broadcast::Sender<PlaybackMessage>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AppState {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            engine: Arc::new(Mutex::new(PlaybackEngine::new())),
            recording: Arc::new(RwLock::new(None)),
            events,
            ticker: Arc::new(Mutex::new(None)),
        }
    }

    /// Starts the engine and its ticker. `Ok(false)` when already running.
    pub async fn start_playback(&self, period: Duration) -> Result<bool> {
        let mut slot = self.ticker.lock().await;

        let started = self.engine.lock().await.start()?;
        if started {
            let handle = ticker::spawn(self.engine.clone(), self.events.clone(), period);
            if let Some(old) = slot.replace(handle) {
                old.abort();
            }
        }
        Ok(started)
    }

    /// Stops the engine and its ticker. Returns whether it was running.
    pub async fn stop_playback(&self) -> bool {
        let mut slot = self.ticker.lock().await;

        let was_running = self.engine.lock().await.stop();
        if let Some(old) = slot.take() {
            old.abort();
        }
        was_running
    }

    /// Swaps in a new sequence, which leaves the engine idle. On failure the
    /// engine and its ticker are left as they were.
    pub async fn load_playback(&self, samples: ScaledSampleSequence) -> Result<()> {
        let mut slot = self.ticker.lock().await;

        self.engine.lock().await.load(samples)?;
        if let Some(old) = slot.take() {
            old.abort();
        }
        Ok(())
    }

    pub async fn ticker_active(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajectory_reader::{PlaybackState, Sample, UnitScaler};

    const PERIOD: Duration = Duration::from_millis(100);

    async fn loaded_state(n: usize) -> AppState {
        let state = AppState::new();
        let seq = (0..n)
            .map(|i| Sample::from(vec![i as f64; 3]))
            .collect::<SampleSequence>();
        state
            .load_playback(UnitScaler::new(1.0).scale_owned(seq))
            .await
            .unwrap();
        state
    }

    #[tokio::test(start_paused = true)]
    async fn start_after_stop_keeps_a_live_ticker() {
        let state = loaded_state(3).await;
        assert!(state.start_playback(PERIOD).await.unwrap());

        assert!(state.stop_playback().await);
        assert!(state.start_playback(PERIOD).await.unwrap());
        assert!(state.ticker_active().await);

        // the new run plays to the end instead of hanging
        tokio::time::sleep(PERIOD * 10).await;
        assert_eq!(state.engine.lock().await.state(), PlaybackState::IDLE);
        assert!(state.start_playback(PERIOD).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn racing_stop_and_start_never_strand_the_engine() {
        for _ in 0..20 {
            let state = loaded_state(3).await;
            state.start_playback(PERIOD).await.unwrap();

            let (a, b) = (state.clone(), state.clone());
            let stop = tokio::spawn(async move { a.stop_playback().await });
            let start = tokio::spawn(async move { b.start_playback(PERIOD).await });
            stop.await.unwrap();
            start.await.unwrap().unwrap();

            let running = state.engine.lock().await.is_running();
            assert_eq!(running, state.ticker_active().await);

            tokio::time::sleep(PERIOD * 10).await;
            assert_eq!(state.engine.lock().await.state(), PlaybackState::IDLE);
            assert!(state.start_playback(PERIOD).await.unwrap());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn load_resets_running_playback_and_ticker() {
        let state = loaded_state(5).await;
        state.start_playback(PERIOD).await.unwrap();

        let seq = SampleSequence::from_iter([Sample::from(vec![9.0; 3])]);
        state
            .load_playback(UnitScaler::new(1.0).scale_owned(seq))
            .await
            .unwrap();

        assert_eq!(state.engine.lock().await.state(), PlaybackState::IDLE);
        assert!(!state.ticker_active().await);
        assert!(state.start_playback(PERIOD).await.unwrap());
    }

    #[tokio::test]
    async fn failed_load_keeps_playback_running() {
        let state = loaded_state(5).await;
        state.start_playback(PERIOD).await.unwrap();

        let narrow = SampleSequence::from_iter([Sample::from(vec![1.0, 2.0])]);
        assert!(state
            .load_playback(UnitScaler::new(1.0).scale_owned(narrow))
            .await
            .is_err());

        assert!(state.engine.lock().await.is_running());
        assert!(state.ticker_active().await);
        state.stop_playback().await;
    }
}
