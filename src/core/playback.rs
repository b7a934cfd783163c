// Tick-driven playback through a scaled sample sequence

use crate::core::constants::POSITION_CHANNELS;
use crate::core::error::{Result, TrajectoryError};
use crate::core::format::{PlaybackState, Position, Sample, ScaledSampleSequence};
use serde::Serialize;
use tracing::{debug, info};

/// What a single tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TickEvent {
    /// Engine was not running; nothing changed.
    Idle,
    /// First tick of a run: place the body at sample 0.
    Instantiate { index: usize, position: Position },
    Advance { index: usize, position: Position },
    /// The sequence is exhausted and the engine is back to idle.
    Done,
}

impl TickEvent {
    pub fn position(&self) -> Option<(usize, Position)> {
        match self {
            TickEvent::Instantiate { index, position } | TickEvent::Advance { index, position } => {
                Some((*index, *position))
            }
            TickEvent::Idle | TickEvent::Done => None,
        }
    }
}

/// Owns one loaded sequence, the cursor and the running flag. The engine
/// has no clock of its own; whoever owns it calls [`tick`](Self::tick) at
/// the playback cadence.
#[derive(Debug, Default)]
pub struct PlaybackEngine {
    samples: Option<ScaledSampleSequence>,
    cursor: Option<usize>,
    running: bool,
}

impl PlaybackEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples(samples: ScaledSampleSequence) -> Result<Self> {
        let mut engine = Self::new();
        engine.load(samples)?;
        Ok(engine)
    }

    /// Replaces the sequence and resets to idle. On a schema violation the
    /// previous sequence and state are kept.
    pub fn load(&mut self, samples: ScaledSampleSequence) -> Result<()> {
        if let Some((row, found)) = samples.find_narrow_row(POSITION_CHANNELS) {
            return Err(TrajectoryError::SchemaViolation {
                row,
                expected: POSITION_CHANNELS,
                found,
            });
        }

        info!("Loaded {} samples for playback", samples.len());
        self.samples = Some(samples);
        self.reset();
        Ok(())
    }

    /// Returns `Ok(true)` when playback begins and `Ok(false)` when it was
    /// already running.
    pub fn start(&mut self) -> Result<bool> {
        if self.len() == 0 {
            return Err(TrajectoryError::EmptySequence);
        }
        if self.running {
            return Ok(false);
        }

        self.running = true;
        self.cursor = None;
        info!("Playback started ({} samples)", self.len());
        Ok(true)
    }

    pub fn tick(&mut self) -> TickEvent {
        if !self.running {
            return TickEvent::Idle;
        }

        let next = match self.cursor {
            None => 0,
            Some(c) => c + 1,
        };

        let position = self
            .samples
            .as_ref()
            .and_then(|s| s.get(next))
            .and_then(Position::from_sample);

        match position {
            Some(position) => {
                let first = self.cursor.is_none();
                self.cursor = Some(next);
                debug!("tick -> sample {}", next);
                if first {
                    TickEvent::Instantiate {
                        index: next,
                        position,
                    }
                } else {
                    TickEvent::Advance {
                        index: next,
                        position,
                    }
                }
            }
            None => {
                info!("Playback done after {} samples", next);
                self.reset();
                TickEvent::Done
            }
        }
    }

    /// Cancels a run without a done event. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        if was_running {
            info!("Playback stopped at {:?}", self.cursor);
        }
        self.reset();
        was_running
    }

    pub fn current_sample(&self) -> Option<&Sample> {
        let cursor = self.cursor?;
        self.samples.as_ref()?.get(cursor)
    }

    pub fn current_position(&self) -> Option<Position> {
        self.current_sample().and_then(Position::from_sample)
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            cursor: self.cursor,
            running: self.running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn len(&self) -> usize {
        self.samples.as_ref().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reset(&mut self) {
        self.cursor = None;
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::{Reading, SampleSequence};
    use crate::core::scaler::UnitScaler;

    fn engine_with(rows: &[[f64; 3]]) -> PlaybackEngine {
        let seq = rows.iter().map(|r| Sample::from(r.to_vec())).collect::<SampleSequence>();
        PlaybackEngine::with_samples(UnitScaler::new(1.0).scale_owned(seq)).unwrap()
    }

    #[test]
    fn starts_idle() {
        let engine = PlaybackEngine::new();
        assert_eq!(engine.state(), PlaybackState::IDLE);
        assert!(engine.current_sample().is_none());
    }

    #[test]
    fn n_ticks_report_every_sample_then_done() {
        let rows = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let mut engine = engine_with(&rows);
        assert_eq!(engine.start().unwrap(), true);
        assert_eq!(engine.state(), PlaybackState { cursor: None, running: true });

        for (i, row) in rows.iter().enumerate() {
            let event = engine.tick();
            if i == 0 {
                assert!(matches!(event, TickEvent::Instantiate { index: 0, .. }));
            } else {
                assert!(matches!(event, TickEvent::Advance { index, .. } if index == i));
            }
            let (_, position) = event.position().unwrap();
            assert_eq!(position.as_array(), Some(*row));
            assert_eq!(engine.state().cursor, Some(i));
            assert_eq!(engine.current_position(), Some(position));
        }

        assert_eq!(engine.tick(), TickEvent::Done);
        assert_eq!(engine.state(), PlaybackState::IDLE);
        assert!(engine.current_sample().is_none());

        // no further updates until restarted
        assert_eq!(engine.tick(), TickEvent::Idle);
        assert_eq!(engine.state(), PlaybackState::IDLE);
    }

    #[test]
    fn done_fires_exactly_once_per_run() {
        let mut engine = engine_with(&[[0.0; 3], [1.0; 3]]);
        for _ in 0..2 {
            engine.start().unwrap();
            let events: Vec<_> = (0..5).map(|_| engine.tick()).collect();
            let done = events.iter().filter(|e| **e == TickEvent::Done).count();
            let moves = events.iter().filter(|e| e.position().is_some()).count();
            assert_eq!((moves, done), (2, 1));
            assert_eq!(events[2], TickEvent::Done);
        }
    }

    #[test]
    fn start_on_empty_never_runs() {
        let mut engine = PlaybackEngine::new();
        assert!(matches!(engine.start(), Err(TrajectoryError::EmptySequence)));
        assert!(!engine.is_running());

        let mut engine = engine_with(&[]);
        assert!(matches!(engine.start(), Err(TrajectoryError::EmptySequence)));
        assert_eq!(engine.state(), PlaybackState::IDLE);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut engine = engine_with(&[[0.0; 3], [1.0; 3]]);
        engine.start().unwrap();
        engine.tick();
        assert_eq!(engine.start().unwrap(), false);
        assert_eq!(engine.state(), PlaybackState { cursor: Some(0), running: true });
    }

    #[test]
    fn tick_while_stopped_leaves_cursor() {
        let mut engine = engine_with(&[[0.0; 3]]);
        for _ in 0..3 {
            assert_eq!(engine.tick(), TickEvent::Idle);
        }
        assert_eq!(engine.state(), PlaybackState::IDLE);
    }

    #[test]
    fn stop_cancels_without_done() {
        let mut engine = engine_with(&[[0.0; 3], [1.0; 3], [2.0; 3]]);
        engine.start().unwrap();
        engine.tick();
        engine.tick();
        assert!(engine.stop());
        assert_eq!(engine.state(), PlaybackState::IDLE);
        assert_eq!(engine.tick(), TickEvent::Idle);
        assert!(!engine.stop());

        // restart begins at sample 0 again
        engine.start().unwrap();
        assert!(matches!(engine.tick(), TickEvent::Instantiate { index: 0, .. }));
    }

    #[test]
    fn narrow_load_keeps_previous_state() {
        let mut engine = engine_with(&[[0.0; 3], [1.0; 3]]);
        engine.start().unwrap();
        engine.tick();

        let narrow = SampleSequence::from_iter([Sample::from(vec![1.0, 2.0])]);
        let err = engine.load(UnitScaler::new(1.0).scale_owned(narrow)).unwrap_err();
        assert!(matches!(err, TrajectoryError::SchemaViolation { row: 0, expected: 3, found: 2 }));
        assert_eq!(engine.state(), PlaybackState { cursor: Some(0), running: true });
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn loading_resets_running_playback() {
        let mut engine = engine_with(&[[0.0; 3], [1.0; 3]]);
        engine.start().unwrap();
        engine.tick();

        let seq = SampleSequence::from_iter([Sample::from(vec![5.0, 5.0, 5.0])]);
        engine.load(UnitScaler::new(1.0).scale_owned(seq)).unwrap();
        assert_eq!(engine.state(), PlaybackState::IDLE);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn unknown_readings_are_reported_not_fatal() {
        let seq = SampleSequence::from_iter([Sample::from(vec![1.0, f64::NAN, 3.0])]);
        let mut engine = PlaybackEngine::with_samples(UnitScaler::new(2.0).scale_owned(seq)).unwrap();
        engine.start().unwrap();
        let (_, position) = engine.tick().position().unwrap();
        assert_eq!(position.x, Reading::Known(2.0));
        assert_eq!(position.y, Reading::Unknown);
        assert!(!position.is_known());
    }
}
