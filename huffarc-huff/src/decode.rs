//! Huffman decompression.
//!
//! ```text
//! READ_MARKER → REBUILD_TREE → WALK_BODY → DONE
//! ```
//!
//! The body is decoded by walking the tree one bit at a time: `0` goes
//! left, `1` goes right, and each leaf reached emits its byte and restarts
//! the walk at the root. Decoding stops at the end-of-stream leaf, so the
//! zero padding of the last byte is never read.

use crate::config::HuffConfig;
use crate::format::HeaderFormat;
use crate::format::constants::{BITS_PER_INT, BITS_PER_WORD, END_OF_STREAM};
use crate::tree::CodeTree;
use huffarc_core::bitstream::{BitSink, BitSource};
use huffarc_core::error::{HuffError, Result};
use std::io::{Cursor, Read, Seek, Write};

/// Parsed stream header.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Format marker.
    pub magic: u32,
    /// Decoding tree.
    pub tree: CodeTree,
    /// Marker plus tree header, in bits.
    pub header_bits: u64,
}

/// Statistics of one decompress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecompressStats {
    /// Marker plus tree header, in bits.
    pub header_bits: u64,
    /// Bits requested from the source, header included.
    pub input_bits: u64,
    /// Bytes emitted.
    pub output_bytes: u64,
}

/// Read the format marker and the tree header.
///
/// Any marker other than the tree header's is a format error, including the
/// reserved counts header marker.
pub fn read_header<R: Read + Seek>(source: &mut BitSource<R>) -> Result<HeaderInfo> {
    let start = source.bits_consumed();
    let magic = source
        .read_bits(BITS_PER_INT)?
        .ok_or_else(|| HuffError::format("stream too short for a format marker"))?;

    match HeaderFormat::from_magic(magic) {
        Some(HeaderFormat::Tree) => {}
        Some(other) => {
            return Err(HuffError::format(format!(
                "{} header ({:#010x}) is not supported",
                other, magic
            )));
        }
        None => {
            return Err(HuffError::format(format!(
                "unknown format marker {:#010x}",
                magic
            )));
        }
    }

    let tree = CodeTree::deserialize(source)?;
    Ok(HeaderInfo {
        magic,
        tree,
        header_bits: source.bits_consumed() - start,
    })
}

/// Huffman decompressor.
#[derive(Debug, Clone, Default)]
pub struct HuffDecoder;

impl HuffDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decompress one stream from `source` into `sink`.
    ///
    /// Bytes are emitted as they are decoded, so on a `TruncatedBody` error
    /// the sink has already received every byte decoded before the stream
    /// ran out. The sink is not finished; the caller flushes it or discards
    /// the partial output.
    pub fn decompress<R: Read + Seek, W: Write>(
        &self,
        source: &mut BitSource<R>,
        sink: &mut BitSink<W>,
    ) -> Result<DecompressStats> {
        // READ_MARKER, REBUILD_TREE
        let header = read_header(source)?;
        let root = header.tree.root();
        let mut output_bytes = 0u64;

        // WALK_BODY
        if let Some(symbol) = root.symbol() {
            // Zero-length code: nothing to read.
            if symbol != END_OF_STREAM {
                return Err(HuffError::format(format!(
                    "tree header has a single leaf for symbol {} but no end-of-stream leaf",
                    symbol
                )));
            }
        } else {
            let mut node = root;
            loop {
                let bit = source
                    .read_bit()?
                    .ok_or_else(|| HuffError::truncated_body(source.bits_consumed()))?;
                let Some(next) = node.child(bit) else {
                    unreachable!("the walk only rests on internal nodes")
                };

                match next.symbol() {
                    Some(END_OF_STREAM) => break,
                    Some(symbol) => {
                        sink.write_bits(symbol as u32, BITS_PER_WORD)?;
                        output_bytes += 1;
                        node = root;
                    }
                    None => node = next,
                }
            }
        }

        Ok(DecompressStats {
            header_bits: header.header_bits,
            input_bits: source.bits_consumed(),
            output_bytes,
        })
    }
}

/// Decompress from an owned reader into an owned writer.
///
/// Both streams are released when this returns. On a decoding failure the
/// writer receives every byte decoded before the error, then the error is
/// returned.
pub fn decompress_stream<R: Read + Seek, W: Write>(
    reader: R,
    writer: W,
    config: HuffConfig,
) -> Result<DecompressStats> {
    let mut source = BitSource::with_block_size(reader, config.block_size)?;
    let mut sink = BitSink::with_block_size(writer, config.block_size);
    match HuffDecoder::new().decompress(&mut source, &mut sink) {
        Ok(stats) => {
            sink.finish()?;
            Ok(stats)
        }
        Err(e) => {
            // Decoded output is whole bytes, so nothing is left behind.
            sink.flush_complete()?;
            Err(e)
        }
    }
}

/// Decompress a byte slice.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress_stream(Cursor::new(data), &mut output, HuffConfig::DEFAULT)?;
    Ok(output)
}
