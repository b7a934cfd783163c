// Fixed constants for trajectory recordings and playback

/// Display units per metre: the globe is drawn with radius 0.5 for the Earth's 6371 km.
pub const UNIT_RATIO: f64 = 0.5 / 6_371_000.0;

/// Seconds between consecutive samples. Used only when building chart series.
pub const SAMPLE_STEP: f64 = 0.01;

/// Milliseconds between playback ticks. Used only by the playback ticker.
pub const TICK_PERIOD_MS: u64 = 100;

/// Channels consumed as x, y, z by playback and charting.
pub const POSITION_CHANNELS: usize = 3;

pub const DEFAULT_DELIMITER: u8 = b',';

pub const SERIES_LABELS: [&str; POSITION_CHANNELS] = ["X", "Y", "Z"];

// Magic prefixes used to sniff compressed recordings
pub const GZIP_MAGIC: &[u8; 2] = &[0x1f, 0x8b];
pub const ZSTD_MAGIC: &[u8; 4] = &[0x28, 0xb5, 0x2f, 0xfd];
pub const LZ4_FRAME_MAGIC: &[u8; 4] = &[0x04, 0x22, 0x4d, 0x18];

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionType {
    None = 0,
    Zlib = 1,
    Lz4 = 2,
    Zstd = 3,
    Gzip = 4,
}

impl CompressionType {
    /// Guesses the codec from the leading bytes of a file.
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(GZIP_MAGIC) {
            CompressionType::Gzip
        } else if data.starts_with(ZSTD_MAGIC) {
            CompressionType::Zstd
        } else if data.starts_with(LZ4_FRAME_MAGIC) {
            CompressionType::Lz4
        } else if is_zlib_header(data) {
            CompressionType::Zlib
        } else {
            CompressionType::None
        }
    }
}

// CMF 0x78 (deflate, 32K window) and a header checksum divisible by 31
fn is_zlib_header(data: &[u8]) -> bool {
    match data {
        [cmf, flg, ..] => *cmf == 0x78 && (u16::from(*cmf) << 8 | u16::from(*flg)) % 31 == 0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_codecs_from_magic() {
        assert_eq!(CompressionType::detect(&[0x1f, 0x8b, 0x08]), CompressionType::Gzip);
        assert_eq!(CompressionType::detect(&[0x28, 0xb5, 0x2f, 0xfd, 0]), CompressionType::Zstd);
        assert_eq!(CompressionType::detect(&[0x04, 0x22, 0x4d, 0x18]), CompressionType::Lz4);
        assert_eq!(CompressionType::detect(&[0x78, 0x9c]), CompressionType::Zlib);
        assert_eq!(CompressionType::detect(b"1,2,3\n"), CompressionType::None);
        assert_eq!(CompressionType::detect(b""), CompressionType::None);
    }

    #[test]
    fn plain_text_starting_with_x_is_not_zlib() {
        // 'x' is 0x78 but "x," fails the header checksum
        assert_eq!(CompressionType::detect(b"x,y,z\n"), CompressionType::None);
    }

    #[test]
    fn step_and_tick_are_independent() {
        assert_eq!(SAMPLE_STEP, 0.01);
        assert_eq!(TICK_PERIOD_MS, 100);
    }
}
