// Headless replay of a trajectory recording

use std::thread::sleep;
use std::time::Duration;

use nalgebra::Vector3;

use trajectory_reader::core::constants::{SAMPLE_STEP, TICK_PERIOD_MS};
use trajectory_reader::core::sim::geodetic_height;
use trajectory_reader::{
    PlaybackEngine, Position, Recording, Result, SampleParser, TickEvent, TrajectorySeriesBuilder,
    UnitScaler,
};
use tracing::{info, warn, Level};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/trajectory.csv".to_string());

    let recording = Recording::open(&path)?;
    let samples = recording.samples(&SampleParser::new())?;
    info!("{}: {} samples", recording.name(), samples.len());

    // Chart path: unscaled samples on the fixed sample step
    let series = TrajectorySeriesBuilder::new(SAMPLE_STEP)?.build(&samples)?;
    info!("Series cover {:.2} s", series.duration());
    for channel in series.channels() {
        let known: Vec<f64> = channel.known_points().map(|(_, v)| v).collect();
        match value_range(&known) {
            Some((min, max)) => {
                info!("  {}: {} points, range [{}, {}]", channel.label, known.len(), min, max)
            }
            None => info!("  {}: no known points", channel.label),
        }
    }

    // Samples are metres in Earth-centred coordinates
    let peak = samples
        .iter()
        .filter_map(|s| Position::from_sample(s)?.as_array())
        .map(|[x, y, z]| geodetic_height(&Vector3::new(x, y, z)))
        .fold(None, |best: Option<f64>, h| Some(best.map_or(h, |b| b.max(h))));
    match peak {
        Some(h) => info!("Peak altitude {:.1} km", h / 1000.0),
        None => info!("No complete positions for altitude"),
    }

    // Playback path: scaled samples on the fixed tick period
    let mut engine = PlaybackEngine::with_samples(UnitScaler::default().scale_owned(samples))?;
    engine.start()?;

    loop {
        match engine.tick() {
            TickEvent::Done => {
                info!("done");
                break;
            }
            TickEvent::Idle => break,
            event => {
                if let Some((index, position)) = event.position() {
                    match position.as_array() {
                        Some([x, y, z]) => info!("[{}] x={:.6} y={:.6} z={:.6}", index, x, y, z),
                        None => warn!("[{}] position unknown", index),
                    }
                }
            }
        }
        sleep(Duration::from_millis(TICK_PERIOD_MS));
    }

    Ok(())
}

fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold((*first, *first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}
