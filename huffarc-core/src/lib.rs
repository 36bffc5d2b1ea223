//! # HuffArc Core
//!
//! Core components for the HuffArc Huffman compressor.
//!
//! - [`bitstream`]: MSB-first bit-level I/O ([`BitSource`], [`BitSink`])
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     huffarc compress / decompress / info / test         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Huffman tree, tree header, encoder/decoder          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitSource/BitSink, HuffError                        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use huffarc_core::bitstream::BitSource;
//! use std::io::Cursor;
//!
//! let mut source = BitSource::new(Cursor::new(vec![0xAB, 0xCD])).unwrap();
//! assert_eq!(source.read_bits(12).unwrap(), Some(0xABC));
//! assert_eq!(source.read_bits(8).unwrap(), None);
//! assert_eq!(source.bits_consumed(), 20);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitSink, BitSource};
pub use error::{HuffError, Result};
