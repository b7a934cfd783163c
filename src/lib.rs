// Trajectory recording reader and playback engine
// Main library entry point

pub mod core;

// Re-export main types
pub use core::error::{ParseFieldError, Result, TrajectoryError};
pub use core::format::{
    ChannelSeries, PlaybackState, Position, Reading, Sample, SampleSequence,
    ScaledSampleSequence, TimeSeriesTriple,
};
pub use core::parser::SampleParser;
pub use core::playback::{PlaybackEngine, TickEvent};
pub use core::reader::{Recording, RecordingInfo};
pub use core::scaler::UnitScaler;
pub use core::series::TrajectorySeriesBuilder;

#[cfg(test)]
mod tests {
    use crate::{PlaybackEngine, Reading, SampleParser, TickEvent, TrajectorySeriesBuilder, UnitScaler};

    #[test]
    fn reexports_cover_parse_scale_and_play() {
        let samples = SampleParser::new().parse("6371000,0,x

").unwrap();
        let series = TrajectorySeriesBuilder::new(0.01)
            .unwrap()
            .build(&samples)
            .unwrap();
        assert_eq!(series.z.values, vec![Reading::Unknown]);

        let mut engine =
            PlaybackEngine::with_samples(UnitScaler::new(0.5 / 6_371_000.0).scale(&samples)).unwrap();
        assert!(engine.start().unwrap());
        match engine.tick() {
            TickEvent::Instantiate { index, position } => {
                assert_eq!(index, 0);
                assert!((position.x.value() - 0.5).abs() < 1e-12);
                assert_eq!(position.z, Reading::Unknown);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(engine.tick(), TickEvent::Done);
    }
}
