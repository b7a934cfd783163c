// tests/trajectory_pipeline.rs

use trajectory_reader::core::constants::{SAMPLE_STEP, UNIT_RATIO};
use trajectory_reader::{
    PlaybackEngine, PlaybackState, Reading, Recording, SampleParser, TickEvent,
    TrajectoryError, TrajectorySeriesBuilder, UnitScaler,
};

const FLIGHT: &str = "6371000,0,0\n6371100,10,-5\n6371200,x,-10\n\n";

#[test]
fn chart_and_playback_paths_share_one_parse() {
    let recording = Recording::from_bytes("flight.csv", FLIGHT.as_bytes().to_vec()).unwrap();
    let (samples, field_errors) = SampleParser::new()
        .parse_with_report(recording.text())
        .unwrap();
    assert_eq!(samples.len(), 3);
    assert_eq!(field_errors.len(), 1);

    // charting sees raw metres
    let series = TrajectorySeriesBuilder::new(SAMPLE_STEP)
        .unwrap()
        .build(&samples)
        .unwrap();
    assert_eq!(series.x.values[1], Reading::Known(6_371_100.0));
    assert_eq!(series.y.values[2], Reading::Unknown);
    assert_eq!(series.y.known_points().count(), 2);

    // playback sees display units and the chart input is untouched
    let scaled = UnitScaler::new(UNIT_RATIO).scale(&samples);
    let mut engine = PlaybackEngine::with_samples(scaled).unwrap();
    engine.start().unwrap();

    let mut reported = Vec::new();
    let mut done_at = None;
    for tick in 1..=10 {
        match engine.tick() {
            TickEvent::Done => {
                done_at = Some(tick);
                break;
            }
            event => reported.push(event.position().unwrap()),
        }
    }

    assert_eq!(reported.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(done_at, Some(4));
    assert_eq!(engine.state(), PlaybackState::IDLE);

    let (_, first) = reported[0];
    assert!((first.x.value() - 0.5).abs() < 1e-12);
    assert!(!reported[2].1.is_known());
    assert_eq!(samples[0][0], Reading::Known(6_371_000.0));
}

#[test]
fn sentinel_and_nan_scenario() {
    let samples = SampleParser::new().parse("1,x,3\n\n").unwrap();
    let scaled = UnitScaler::new(2.0).scale(&samples);
    assert_eq!(
        scaled[0].readings,
        vec![Reading::Known(2.0), Reading::Unknown, Reading::Known(6.0)]
    );
}

#[test]
fn wrong_file_fails_both_consumers_with_row_index() {
    let samples = SampleParser::new()
        .with_strict_width(false)
        .parse("1,2,3\n4,5,6\n7\n\n")
        .unwrap();

    let series_err = TrajectorySeriesBuilder::default().build(&samples).unwrap_err();
    assert!(matches!(series_err, TrajectoryError::SchemaViolation { row: 2, .. }));

    let load_err = PlaybackEngine::with_samples(UnitScaler::default().scale(&samples)).unwrap_err();
    assert!(matches!(load_err, TrajectoryError::SchemaViolation { row: 2, found: 1, .. }));
}

#[test]
fn empty_recording_cannot_start() {
    let samples = SampleParser::new().parse("").unwrap();
    let mut engine = PlaybackEngine::with_samples(UnitScaler::default().scale_owned(samples)).unwrap();
    assert!(matches!(engine.start(), Err(TrajectoryError::EmptySequence)));
    assert_eq!(engine.tick(), TickEvent::Idle);
    assert!(!engine.is_running());
}
