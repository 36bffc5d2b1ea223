//! Codec configuration.

use crate::format::HeaderFormat;
use huffarc_core::bitstream::DEFAULT_BLOCK_SIZE;

/// Huffman codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffConfig {
    /// Header format to write.
    pub header: HeaderFormat,
    /// Bytes moved per underlying read/write by the stream helpers.
    pub block_size: usize,
}

impl HuffConfig {
    /// Tree header, 8 KiB blocks.
    pub const DEFAULT: Self = Self {
        header: HeaderFormat::Tree,
        block_size: DEFAULT_BLOCK_SIZE,
    };

    /// Set the header format.
    pub fn with_header(mut self, header: HeaderFormat) -> Self {
        self.header = header;
        self
    }

    /// Set the I/O block size (clamped to at least one byte).
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }
}

impl Default for HuffConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
