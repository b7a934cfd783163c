use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use trajectory_reader::{PlaybackEngine, Position, TickEvent};

/// One message per reported sample, plus a final one with `end_flag` set
/// when the sequence is exhausted.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackMessage {
    pub seq: u64,
    pub index: Option<usize>,
    pub position: Option<Position>,
    pub end_flag: bool,
}

/// Drives `tick()` at a fixed period until the run ends. The first tick
/// fires immediately so the body appears as soon as playback starts.
pub fn spawn(
    engine: Arc<Mutex<PlaybackEngine>>,
    events: broadcast::Sender<PlaybackMessage>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut seq: u64 = 0;

        info!("Ticker started with period {:?}", period);

        loop {
            ticks.tick().await;

            // lock held for the whole tick so ticks never overlap
            let event = engine.lock().await.tick();

            let message = match event {
                TickEvent::Idle => {
                    debug!("Engine idle, ticker exiting");
                    break;
                }
                TickEvent::Done => PlaybackMessage {
                    seq,
                    index: None,
                    position: None,
                    end_flag: true,
                },
                other => {
                    let (index, position) = match other.position() {
                        Some(p) => p,
                        None => continue,
                    };
                    PlaybackMessage {
                        seq,
                        index: Some(index),
                        position: Some(position),
                        end_flag: false,
                    }
                }
            };

            let done = message.end_flag;
            // no subscribers is fine
            let _ = events.send(message);
            seq += 1;

            if done {
                info!("Playback finished after {} messages", seq);
                break;
            }
        }
    })
}
