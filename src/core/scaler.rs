// Unit conversion applied to every reading

use crate::core::constants::UNIT_RATIO;
use crate::core::format::{Sample, SampleSequence, ScaledSampleSequence};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScaler {
    ratio: f64,
}

impl Default for UnitScaler {
    fn default() -> Self {
        Self::new(UNIT_RATIO)
    }
}

impl UnitScaler {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Leaves the input untouched and returns a scaled copy.
    pub fn scale(&self, sequence: &SampleSequence) -> ScaledSampleSequence {
        let samples = sequence
            .iter()
            .map(|s| Sample::new(s.readings.iter().map(|r| r.scaled(self.ratio)).collect()))
            .collect();

        ScaledSampleSequence::new(self.ratio, samples)
    }

    /// Scales in place; only for a caller that owns the only copy.
    pub fn scale_owned(&self, mut sequence: SampleSequence) -> ScaledSampleSequence {
        for sample in sequence.samples_mut() {
            for reading in sample.readings.iter_mut() {
                *reading = reading.scaled(self.ratio);
            }
        }

        ScaledSampleSequence::new(self.ratio, sequence)
    }
}

pub fn scale(sequence: &SampleSequence, ratio: f64) -> ScaledSampleSequence {
    UnitScaler::new(ratio).scale(sequence)
}
