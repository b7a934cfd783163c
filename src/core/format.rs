// Data structures for trajectory recordings

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One scalar of a sample. `Unknown` marks a field that was not a number;
/// it serializes as `null` so front ends can skip the point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Reading {
    Known(f64),
    Unknown,
}

impl Reading {
    pub fn is_known(&self) -> bool {
        matches!(self, Reading::Known(_))
    }

    pub fn known(&self) -> Option<f64> {
        match self {
            Reading::Known(v) => Some(*v),
            Reading::Unknown => None,
        }
    }

    /// Raw value with `Unknown` mapped to NaN.
    pub fn value(&self) -> f64 {
        self.known().unwrap_or(f64::NAN)
    }

    pub fn scaled(self, ratio: f64) -> Self {
        match self {
            Reading::Known(v) => Reading::from(v * ratio),
            Reading::Unknown => Reading::Unknown,
        }
    }
}

impl From<f64> for Reading {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Reading::Unknown
        } else {
            Reading::Known(v)
        }
    }
}

impl From<Option<f64>> for Reading {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Reading::Unknown, Reading::from)
    }
}

impl From<Reading> for Option<f64> {
    fn from(r: Reading) -> Self {
        r.known()
    }
}

/// One time step's channel readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sample {
    pub readings: Vec<Reading>,
}

impl Sample {
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    pub fn channels(&self) -> usize {
        self.readings.len()
    }

    pub fn get(&self, channel: usize) -> Option<Reading> {
        self.readings.get(channel).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.readings.iter().all(Reading::is_known)
    }
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values.into_iter().map(Reading::from).collect())
    }
}

impl Index<usize> for Sample {
    type Output = Reading;

    fn index(&self, channel: usize) -> &Reading {
        &self.readings[channel]
    }
}

/// Samples in source row order. Built once per file and then only read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampleSequence {
    samples: Vec<Sample>,
}

impl SampleSequence {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Channel count of the first sample, if any.
    pub fn width(&self) -> Option<usize> {
        self.samples.first().map(Sample::channels)
    }

    pub fn unknown_count(&self) -> usize {
        self.samples
            .iter()
            .flat_map(|s| s.readings.iter())
            .filter(|r| !r.is_known())
            .count()
    }

    /// First row with fewer than `required` channels.
    pub fn find_narrow_row(&self, required: usize) -> Option<(usize, usize)> {
        self.samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.channels() < required)
            .map(|(row, s)| (row, s.channels()))
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }
}

impl Index<usize> for SampleSequence {
    type Output = Sample;

    fn index(&self, index: usize) -> &Sample {
        &self.samples[index]
    }
}

impl<'a> IntoIterator for &'a SampleSequence {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl FromIterator<Sample> for SampleSequence {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A sequence whose every reading has been multiplied by `ratio`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledSampleSequence {
    ratio: f64,
    samples: SampleSequence,
}

impl ScaledSampleSequence {
    pub(crate) fn new(ratio: f64, samples: SampleSequence) -> Self {
        Self { ratio, samples }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn samples(&self) -> &SampleSequence {
        &self.samples
    }

    pub fn into_samples(self) -> SampleSequence {
        self.samples
    }
}

impl std::ops::Deref for ScaledSampleSequence {
    type Target = SampleSequence;

    fn deref(&self) -> &SampleSequence {
        &self.samples
    }
}

/// Where the displayed body should be placed for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: Reading,
    pub y: Reading,
    pub z: Reading,
}

impl Position {
    /// Reads the first three channels; `None` when the sample is too narrow.
    pub fn from_sample(sample: &Sample) -> Option<Self> {
        Some(Self {
            x: sample.get(0)?,
            y: sample.get(1)?,
            z: sample.get(2)?,
        })
    }

    pub fn is_known(&self) -> bool {
        self.x.is_known() && self.y.is_known() && self.z.is_known()
    }

    pub fn as_array(&self) -> Option<[f64; 3]> {
        Some([self.x.known()?, self.y.known()?, self.z.known()?])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    /// `None` before the first tick of a run.
    pub cursor: Option<usize>,
    pub running: bool,
}

impl PlaybackState {
    pub const IDLE: PlaybackState = PlaybackState {
        cursor: None,
        running: false,
    };
}

/// One channel of a chart: `(time, value)` pairs in sample order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSeries {
    pub label: String,
    pub timestamps: Vec<f64>,
    pub values: Vec<Reading>,
}

impl ChannelSeries {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn with_capacity(label: impl Into<String>, cap: usize) -> Self {
        Self {
            label: label.into(),
            timestamps: Vec::with_capacity(cap),
            values: Vec::with_capacity(cap),
        }
    }

    pub fn push(&mut self, time: f64, value: Reading) {
        self.timestamps.push(time);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, Reading)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }

    /// Points that can be plotted, skipping unknown readings.
    pub fn known_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points().filter_map(|(t, v)| v.known().map(|v| (t, v)))
    }

    pub fn time_range(&self, start_time: f64, end_time: f64) -> ChannelSeries {
        let mut result = ChannelSeries::new(self.label.clone());
        for (ts, val) in self.points() {
            if ts >= start_time && ts <= end_time {
                result.push(ts, val);
            }
        }
        result
    }
}

/// Per-axis series sharing one time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesTriple {
    pub step: f64,
    pub x: ChannelSeries,
    pub y: ChannelSeries,
    pub z: ChannelSeries,
}

impl TimeSeriesTriple {
    pub fn channels(&self) -> [&ChannelSeries; 3] {
        [&self.x, &self.y, &self.z]
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.x.timestamps.last().copied().unwrap_or(0.0)
    }

    pub fn time_range(&self, start_time: f64, end_time: f64) -> TimeSeriesTriple {
        TimeSeriesTriple {
            step: self.step,
            x: self.x.time_range(start_time, end_time),
            y: self.y.time_range(start_time, end_time),
            z: self.z.time_range(start_time, end_time),
        }
    }
}
