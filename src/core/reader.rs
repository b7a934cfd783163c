// Recording source: one trajectory file, optionally compressed

use crate::core::compression::decompress;
use crate::core::constants::CompressionType;
use crate::core::error::Result;
use crate::core::format::SampleSequence;
use crate::core::parser::SampleParser;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct RecordingInfo {
    pub name: String,
    pub path: Option<PathBuf>,
    pub compression: CompressionType,
    pub byte_size: usize,
    pub loaded_at: DateTime<Utc>,
}

/// The decoded text of one recording file.
#[derive(Debug, Clone)]
pub struct Recording {
    info: RecordingInfo,
    text: String,
}

impl Recording {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string());

        let mut recording = Self::from_bytes(name, bytes)?;
        recording.info.path = Some(path);
        Ok(recording)
    }

    /// Bytes handed over by a file picker or upload.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let byte_size = bytes.len();
        let compression = CompressionType::detect(&bytes);
        debug!("{}: {} bytes, compression {:?}", name, byte_size, compression);

        let raw = match compression {
            CompressionType::None => bytes,
            codec => decompress(&bytes, codec)?,
        };
        let text = String::from_utf8(raw)?;

        info!("Opened recording {} ({} bytes of text)", name, text.len());

        Ok(Self {
            info: RecordingInfo {
                name,
                path: None,
                compression,
                byte_size,
                loaded_at: Utc::now(),
            },
            text,
        })
    }

    pub fn info(&self) -> &RecordingInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn samples(&self, parser: &SampleParser) -> Result<SampleSequence> {
        parser.parse(&self.text)
    }
}
