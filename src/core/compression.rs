// Decompression backends for recorded trajectories

use crate::core::constants::CompressionType;
use crate::core::error::{Result, TrajectoryError};
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;

pub fn decompress(data: &[u8], compression: CompressionType) -> Result<Vec<u8>> {
    match compression {
        CompressionType::None => Ok(data.to_vec()),

        CompressionType::Gzip => read_all(GzDecoder::new(data), "Gzip"),

        CompressionType::Zlib => read_all(ZlibDecoder::new(data), "Zlib"),

        #[cfg(feature = "lz4")]
        CompressionType::Lz4 => {
            let decoder = lz4::Decoder::new(data)
                .map_err(|e| TrajectoryError::DecompressionFailed(format!("LZ4: {}", e)))?;
            read_all(decoder, "LZ4")
        }

        #[cfg(not(feature = "lz4"))]
        CompressionType::Lz4 => Err(TrajectoryError::UnsupportedCompression(
            CompressionType::Lz4 as u8,
        )),

        #[cfg(feature = "zstd")]
        CompressionType::Zstd => zstd::decode_all(data)
            .map_err(|e| TrajectoryError::DecompressionFailed(format!("Zstd: {}", e))),

        #[cfg(not(feature = "zstd"))]
        CompressionType::Zstd => Err(TrajectoryError::UnsupportedCompression(
            CompressionType::Zstd as u8,
        )),
    }
}

fn read_all<R: Read>(mut decoder: R, codec: &str) -> Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| TrajectoryError::DecompressionFailed(format!("{}: {}", codec, e)))?;
    Ok(decompressed)
}
