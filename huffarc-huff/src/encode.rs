//! Two-pass Huffman compression.
//!
//! ```text
//! COUNT → BUILD_TREE → WRITE_HEADER → REWIND → ENCODE_BODY → DONE
//! ```
//!
//! The first pass counts byte frequencies, the tree and its header are
//! written, the source is rewound and the second pass emits one code per
//! byte followed by the end-of-stream code.

use crate::config::HuffConfig;
use crate::format::constants::{ALPHABET_SIZE, BITS_PER_INT, BITS_PER_WORD, END_OF_STREAM};
use crate::tree::CodeTree;
use huffarc_core::bitstream::{BitSink, BitSource};
use huffarc_core::error::{HuffError, Result};
use std::io::{Cursor, Read, Seek, Write};

/// Statistics of one compress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressStats {
    /// Bytes read in each pass.
    pub input_bytes: u64,
    /// Number of distinct byte values in the input.
    pub alphabet_size: usize,
    /// Format marker plus tree header, in bits.
    pub header_bits: u64,
    /// Encoded body including the end-of-stream code, in bits.
    pub body_bits: u64,
}

impl CompressStats {
    /// Size of the compressed stream in bytes, final padding included.
    pub fn output_bytes(&self) -> u64 {
        (self.header_bits + self.body_bits).div_ceil(8)
    }

    /// Compressed size as a fraction of the input size.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes() as f64 / self.input_bytes as f64
    }
}

/// Huffman compressor.
#[derive(Debug, Clone, Default)]
pub struct HuffEncoder {
    config: HuffConfig,
}

impl HuffEncoder {
    /// Create a new encoder.
    pub fn new(config: HuffConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &HuffConfig {
        &self.config
    }

    /// Compress everything `source` holds into `sink`.
    ///
    /// The sink is not finished; the caller pads and flushes it. Fails with
    /// `NotImplemented` before touching the source if the configured header
    /// format is not supported.
    pub fn compress<R: Read + Seek, W: Write>(
        &self,
        source: &mut BitSource<R>,
        sink: &mut BitSink<W>,
    ) -> Result<CompressStats> {
        let header = self.config.header;
        if !header.is_supported() {
            return Err(HuffError::not_implemented(format!("{} header", header)));
        }

        // COUNT
        let (counts, input_bytes) = count_symbols(source)?;

        // BUILD_TREE
        let tree = CodeTree::from_counts(&counts);
        let codes = tree.codes()?;

        // WRITE_HEADER
        let start = sink.bits_written();
        sink.write_bits(header.magic(), BITS_PER_INT)?;
        tree.serialize(sink)?;
        let header_bits = sink.bits_written() - start;

        // REWIND
        source.reset()?;

        // ENCODE_BODY
        let end_code = codes
            .get(END_OF_STREAM)
            .ok_or_else(|| HuffError::missing_code(END_OF_STREAM))?;
        while let Some(symbol) = source.read_bits(BITS_PER_WORD)? {
            let symbol = symbol as u16;
            let code = codes
                .get(symbol)
                .ok_or_else(|| HuffError::missing_code(symbol))?;
            code.write_to(sink)?;
        }
        end_code.write_to(sink)?;

        Ok(CompressStats {
            input_bytes,
            alphabet_size: counts.iter().filter(|&&count| count > 0).count(),
            header_bits,
            body_bits: sink.bits_written() - start - header_bits,
        })
    }
}

/// Count byte frequencies until end of stream.
fn count_symbols<R: Read + Seek>(
    source: &mut BitSource<R>,
) -> Result<([u64; ALPHABET_SIZE], u64)> {
    let mut counts = [0u64; ALPHABET_SIZE];
    let mut total = 0u64;
    while let Some(symbol) = source.read_bits(BITS_PER_WORD)? {
        counts[symbol as usize] += 1;
        total += 1;
    }
    Ok((counts, total))
}

/// Compress from an owned reader into an owned writer.
///
/// Both streams are released when this returns, on success or failure.
pub fn compress_stream<R: Read + Seek, W: Write>(
    reader: R,
    writer: W,
    config: HuffConfig,
) -> Result<CompressStats> {
    let mut source = BitSource::with_block_size(reader, config.block_size)?;
    let mut sink = BitSink::with_block_size(writer, config.block_size);
    let stats = HuffEncoder::new(config).compress(&mut source, &mut sink)?;
    sink.finish()?;
    Ok(stats)
}

/// Compress a byte slice with the given configuration.
pub fn compress_with(data: &[u8], config: HuffConfig) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress_stream(Cursor::new(data), &mut output, config)?;
    Ok(output)
}

/// Compress a byte slice with the default configuration.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, HuffConfig::DEFAULT)
}
