//! # HuffArc Huff
//!
//! Pure Rust two-pass Huffman compression.
//!
//! A compressed stream is laid out MSB-first as:
//!
//! ```text
//! ┌──────────────┬──────────────────────────┬───────────────────────────┐
//! │ 0xFACE8201   │ tree header (preorder)   │ body: codes + EOS code    │
//! │ 32 bits      │ 0 = internal,            │ last byte zero-padded     │
//! │              │ 1 + 9-bit symbol = leaf  │                           │
//! └──────────────┴──────────────────────────┴───────────────────────────┘
//! ```
//!
//! The alphabet is the 256 byte values plus an end-of-stream sentinel
//! (symbol 256), so the body ends unambiguously regardless of padding.
//!
//! ## Example
//!
//! ```rust
//! use huffarc_huff::{compress, decompress};
//!
//! let original = b"AAAB";
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Streams
//!
//! Compression reads its input twice, so the reader must be seekable:
//!
//! ```rust
//! use huffarc_huff::{HuffConfig, compress_stream, decompress_stream};
//! use std::io::Cursor;
//!
//! let mut compressed = Vec::new();
//! let stats = compress_stream(
//!     Cursor::new(b"mississippi".to_vec()),
//!     &mut compressed,
//!     HuffConfig::DEFAULT,
//! )
//! .unwrap();
//! assert_eq!(stats.alphabet_size, 4);
//!
//! let mut restored = Vec::new();
//! decompress_stream(Cursor::new(compressed), &mut restored, HuffConfig::DEFAULT).unwrap();
//! assert_eq!(restored, b"mississippi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod codes;
pub mod config;
pub mod decode;
pub mod encode;
pub mod format;
pub mod tree;

// Re-exports
pub use codes::{Code, CodeTable, MAX_CODE_LENGTH};
pub use config::HuffConfig;
pub use decode::{
    DecompressStats, HeaderInfo, HuffDecoder, decompress, decompress_stream, read_header,
};
pub use encode::{CompressStats, HuffEncoder, compress, compress_stream, compress_with};
pub use format::HeaderFormat;
pub use huffarc_core::{BitSink, BitSource, HuffError, Result};
pub use tree::{CodeNode, CodeTree, MAX_TREE_DEPTH};
