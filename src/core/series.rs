// Per-axis chart series from parsed samples

use crate::core::constants::{POSITION_CHANNELS, SAMPLE_STEP, SERIES_LABELS};
use crate::core::error::{Result, TrajectoryError};
use crate::core::format::{ChannelSeries, SampleSequence, TimeSeriesTriple};

#[derive(Debug, Clone, Copy)]
pub struct TrajectorySeriesBuilder {
    step: f64,
}

impl Default for TrajectorySeriesBuilder {
    fn default() -> Self {
        Self { step: SAMPLE_STEP }
    }
}

impl TrajectorySeriesBuilder {
    pub fn new(step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(TrajectoryError::InvalidStep(step));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Sample `i` lands at time `i * step` on all three series. Fails on the
    /// first sample narrower than three channels without building anything.
    pub fn build(&self, sequence: &SampleSequence) -> Result<TimeSeriesTriple> {
        if let Some((row, found)) = sequence.find_narrow_row(POSITION_CHANNELS) {
            return Err(TrajectoryError::SchemaViolation {
                row,
                expected: POSITION_CHANNELS,
                found,
            });
        }

        let [lx, ly, lz] = SERIES_LABELS;
        let n = sequence.len();
        let mut x = ChannelSeries::with_capacity(lx, n);
        let mut y = ChannelSeries::with_capacity(ly, n);
        let mut z = ChannelSeries::with_capacity(lz, n);

        for (i, sample) in sequence.iter().enumerate() {
            let t = i as f64 * self.step;
            x.push(t, sample[0]);
            y.push(t, sample[1]);
            z.push(t, sample[2]);
        }

        Ok(TimeSeriesTriple {
            step: self.step,
            x,
            y,
            z,
        })
    }
}

pub fn build(sequence: &SampleSequence, step: f64) -> Result<TimeSeriesTriple> {
    TrajectorySeriesBuilder::new(step)?.build(sequence)
}
