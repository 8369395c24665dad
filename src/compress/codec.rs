//! Payload compression codec
//!
//! Wraps the deflate encoder behind the quality knob the pipeline exposes:
//! quality 1-100 maps onto gzip levels 0-9.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::utils::{CompressError, Result};

pub const MIN_QUALITY: u32 = 1;
pub const MAX_QUALITY: u32 = 100;

/// Gzip codec with a validated quality setting
#[derive(Debug, Clone)]
pub struct DeflateCodec {
    level: Compression,
}

impl DeflateCodec {
    /// Create a codec from a quality in `1..=100`
    pub fn new(quality: u32) -> Result<Self> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressError::InvalidQuality(quality).into());
        }

        // 1 maps to level 0 (stored), 100 to level 9 (best)
        let level = quality * 9 / MAX_QUALITY;
        Ok(Self {
            level: Compression::new(level),
        })
    }

    /// The underlying gzip level (0-9)
    pub fn level(&self) -> u32 {
        self.level.level()
    }

    /// Compress a payload into a gzip stream
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(input.len() / 2 + 64), self.level);
        encoder
            .write_all(input)
            .map_err(CompressError::Encode)?;
        let encoded = encoder.finish().map_err(CompressError::Encode)?;
        Ok(encoded)
    }
}
