// Delimited text -> SampleSequence

use crate::core::constants::DEFAULT_DELIMITER;
use crate::core::error::{ParseFieldError, Result, TrajectoryError};
use crate::core::format::{Reading, Sample, SampleSequence};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

/// Rows of comma separated numbers, one sample per row. The final row of
/// the text is a sentinel and is always dropped.
#[derive(Debug, Clone, Copy)]
pub struct SampleParser {
    delimiter: u8,
    strict_width: bool,
}

impl Default for SampleParser {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            strict_width: true,
        }
    }
}

impl SampleParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Loose mode accepts rows of any width; consumers then check their own
    /// minimum channel count.
    pub fn with_strict_width(mut self, strict: bool) -> Self {
        self.strict_width = strict;
        self
    }

    pub fn parse(&self, raw: &str) -> Result<SampleSequence> {
        self.parse_with_report(raw).map(|(samples, _)| samples)
    }

    pub fn parse_with_report(&self, raw: &str) -> Result<(SampleSequence, Vec<ParseFieldError>)> {
        let rows: Vec<&str> = raw.lines().collect();
        let data_rows = rows.len().saturating_sub(1);

        let mut samples = Vec::with_capacity(data_rows);
        let mut field_errors = Vec::new();
        let mut expected_width = None;

        let mut builder = self.reader_builder();
        let mut record = StringRecord::new();

        for (row, line) in rows[..data_rows].iter().enumerate() {
            tokenize(&mut builder, line, &mut record)?;

            if self.strict_width {
                let expected = *expected_width.get_or_insert(record.len());
                if record.len() != expected {
                    return Err(TrajectoryError::SchemaViolation {
                        row,
                        expected,
                        found: record.len(),
                    });
                }
            }

            let readings = record
                .iter()
                .enumerate()
                .map(|(column, field)| match parse_field(field) {
                    Some(v) => Reading::from(v),
                    None => {
                        debug!("row {} column {}: {:?} is not a number", row, column, field);
                        field_errors.push(ParseFieldError {
                            row,
                            column,
                            raw: field.to_string(),
                        });
                        Reading::Unknown
                    }
                })
                .collect();

            samples.push(Sample::new(readings));
        }

        if !field_errors.is_empty() {
            warn!(
                "{} field(s) were not numeric and are marked unknown",
                field_errors.len()
            );
        }
        debug!("Parsed {} samples from {} rows", samples.len(), rows.len());

        Ok((SampleSequence::new(samples), field_errors))
    }

    fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter);
        builder
    }
}

/// Reads one line into `record`, reusing its storage. The reader's input
/// buffer is sized to the line so each row costs one small allocation.
/// A blank line yields zero fields.
fn tokenize(builder: &mut ReaderBuilder, line: &str, record: &mut StringRecord) -> Result<()> {
    record.clear();
    let mut reader = builder
        .buffer_capacity(line.len().max(1))
        .from_reader(line.as_bytes());
    reader.read_record(record)?;
    Ok(())
}

/// `None` for anything that is not a numeric literal. A literal NaN is
/// accepted here and becomes an unknown reading downstream.
fn parse_field(field: &str) -> Option<f64> {
    field.parse::<f64>().ok()
}

/// Parses with the default settings.
pub fn parse(raw: &str) -> Result<SampleSequence> {
    SampleParser::default().parse(raw)
}
