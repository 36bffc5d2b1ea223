//! Bit-level I/O for Huffman coding.
//!
//! This module provides [`BitSource`] and [`BitSink`] for reading and
//! writing fields of 1-32 bits over byte-oriented streams.
//!
//! # Bit Ordering
//!
//! Both types are MSB-first: the first bit of a field lands in the most
//! significant free bit of the current byte, and multi-bit fields are
//! big-endian. A 32-bit field written at a byte boundary therefore reads
//! back identically as four big-endian bytes.
//!
//! # Example
//!
//! ```
//! use huffarc_core::bitstream::{BitSink, BitSource};
//! use std::io::Cursor;
//!
//! let mut sink = BitSink::new(Vec::new());
//! sink.write_bits(0b101, 3).unwrap();
//! sink.write_bits(0b1100, 4).unwrap();
//! let output = sink.finish().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut source = BitSource::new(Cursor::new(output)).unwrap();
//! assert_eq!(source.read_bits(3).unwrap(), Some(0b101));
//! assert_eq!(source.read_bits(4).unwrap(), Some(0b1100));
//! ```

use crate::error::{HuffError, Result};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

/// Widest field a single read or write may carry.
pub const MAX_BITS: u32 = 32;

/// Default size of the byte block pulled from (or pushed to) the stream.
pub const DEFAULT_BLOCK_SIZE: usize = 8192;

#[inline]
fn check_width(count: u32) -> Result<()> {
    if count == 0 || count > MAX_BITS {
        return Err(HuffError::invalid_width(count));
    }
    Ok(())
}

#[inline]
fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// A bit-level reader over a seekable byte stream.
///
/// Bytes are pulled from the stream a block at a time and fed into a 64-bit
/// shift register. The source remembers the stream position it was created
/// at so [`reset`](Self::reset) can rewind for a second pass without
/// reopening the stream.
#[derive(Debug)]
pub struct BitSource<R: Read + Seek> {
    /// Underlying reader.
    reader: R,
    /// Stream position at construction; `reset` seeks back here.
    origin: u64,
    /// Bytes read from the stream but not yet shifted into `buffer`.
    block: Vec<u8>,
    /// Number of valid bytes in `block`.
    block_len: usize,
    /// Next unread byte in `block`.
    block_pos: usize,
    /// Shift register (MSB-first, valid bits are the low `available` bits).
    buffer: u64,
    /// Number of valid bits in `buffer`.
    available: u32,
    /// Cumulative bits requested by callers.
    bits_requested: u64,
    /// Whether the underlying reader has reported end of stream.
    exhausted: bool,
}

impl<R: Read + Seek> BitSource<R> {
    /// Create a new `BitSource` with the default block size.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_block_size(reader, DEFAULT_BLOCK_SIZE)
    }

    /// Create a new `BitSource` pulling `block_size` bytes per stream read.
    pub fn with_block_size(mut reader: R, block_size: usize) -> Result<Self> {
        let origin = reader.stream_position()?;
        Ok(Self {
            reader,
            origin,
            block: vec![0u8; block_size.max(1)],
            block_len: 0,
            block_pos: 0,
            buffer: 0,
            available: 0,
            bits_requested: 0,
            exhausted: false,
        })
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitSource` and return the underlying reader.
    ///
    /// The reader's position is wherever the last block read left it.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Cumulative number of bits requested so far.
    ///
    /// Every call to [`read_bits`](Self::read_bits) with a valid width adds
    /// its width, including calls that end up reporting end of stream. This
    /// is a diagnostic counter, not a stream position.
    pub fn bits_consumed(&self) -> u64 {
        self.bits_requested
    }

    /// Rewind to the position the stream had when this source was created.
    ///
    /// All buffered bits are dropped and the counter starts over.
    pub fn reset(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(self.origin))?;
        self.block_len = 0;
        self.block_pos = 0;
        self.buffer = 0;
        self.available = 0;
        self.bits_requested = 0;
        self.exhausted = false;
        Ok(())
    }

    /// Pull the next block from the stream. Returns `false` at end of stream.
    fn fill_block(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }

        loop {
            match self.reader.read(&mut self.block) {
                Ok(0) => {
                    self.exhausted = true;
                    self.block_len = 0;
                    self.block_pos = 0;
                    return Ok(false);
                }
                Ok(n) => {
                    self.block_len = n;
                    self.block_pos = 0;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Top up the shift register until it holds at least `count` bits.
    ///
    /// Only bytes the stream actually delivered are counted, so a short
    /// final read never surfaces stale block contents. Returns `false` if
    /// the stream ran dry first.
    fn fill_buffer(&mut self, count: u32) -> Result<bool> {
        while self.available < count {
            if self.block_pos == self.block_len && !self.fill_block()? {
                return Ok(false);
            }

            let room = ((64 - self.available) / 8) as usize;
            let take = room.min(self.block_len - self.block_pos);
            for &byte in &self.block[self.block_pos..self.block_pos + take] {
                self.buffer = (self.buffer << 8) | byte as u64;
                self.available += 8;
            }
            self.block_pos += take;
        }
        Ok(true)
    }

    /// Read `count` bits (1-32), MSB-first.
    ///
    /// Returns `Ok(None)` if fewer than `count` bits remain; the leftover
    /// bits are discarded, so every later read also reports end of stream.
    #[inline]
    pub fn read_bits(&mut self, count: u32) -> Result<Option<u32>> {
        check_width(count)?;
        self.bits_requested += count as u64;

        if !self.fill_buffer(count)? {
            self.buffer = 0;
            self.available = 0;
            return Ok(None);
        }

        let shift = self.available - count;
        let value = (self.buffer >> shift) as u32;
        self.buffer &= low_mask(shift);
        self.available = shift;

        Ok(Some(value))
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        Ok(self.read_bits(1)?.map(|bit| bit != 0))
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// Completed bytes are collected into a block and handed to the writer when
/// the block fills. Call [`finish`](Self::finish) when done: it pads the last
/// partial byte with zero bits, flushes everything and returns the writer.
/// Dropping a sink without finishing it discards unflushed bits.
#[derive(Debug)]
pub struct BitSink<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Completed bytes not yet written.
    block: Vec<u8>,
    /// Block size that triggers a write.
    block_size: usize,
    /// Bit accumulator (MSB-first, valid bits are the low `bits_in_buffer`).
    buffer: u64,
    /// Number of bits in the accumulator (always < 8 between calls).
    bits_in_buffer: u32,
    /// Total bits written, not counting padding.
    total_bits_written: u64,
}

impl<W: Write> BitSink<W> {
    /// Create a new `BitSink` with the default block size.
    pub fn new(writer: W) -> Self {
        Self::with_block_size(writer, DEFAULT_BLOCK_SIZE)
    }

    /// Create a new `BitSink` that writes to the stream every `block_size`
    /// completed bytes.
    pub fn with_block_size(writer: W, block_size: usize) -> Self {
        let block_size = block_size.max(1);
        Self {
            writer,
            block: Vec::with_capacity(block_size),
            block_size,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Move complete bytes from the accumulator into the block.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            self.block.push((self.buffer >> self.bits_in_buffer) as u8);
        }
        self.buffer &= low_mask(self.bits_in_buffer);

        if self.block.len() >= self.block_size {
            self.writer.write_all(&self.block)?;
            self.block.clear();
        }
        Ok(())
    }

    /// Write the low `count` bits (1-32) of `value`, MSB-first.
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u32) -> Result<()> {
        check_width(count)?;

        let value = value as u64 & low_mask(count);
        self.buffer = (self.buffer << count) | value;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad any partial byte with zero bits and flush everything to the
    /// underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
        }
        self.flush_bytes()?;

        if !self.block.is_empty() {
            self.writer.write_all(&self.block)?;
            self.block.clear();
        }
        self.writer.flush()?;

        Ok(())
    }

    /// Hand every completed byte to the underlying writer without padding.
    ///
    /// Bits of a partial last byte stay in the sink.
    pub fn flush_complete(&mut self) -> Result<()> {
        if !self.block.is_empty() {
            self.writer.write_all(&self.block)?;
            self.block.clear();
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Flush (with padding) and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
