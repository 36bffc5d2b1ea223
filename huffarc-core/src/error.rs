//! Error types for HuffArc operations.
//!
//! Compressed-data errors (`Format`, `TruncatedBody`) are kept apart from
//! I/O failures of the underlying stream so callers can tell a corrupt
//! `.hf` file from an unreadable one.

use std::io;
use thiserror::Error;

/// The main error type for HuffArc operations.
#[derive(Debug, Error)]
pub enum HuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unexpected format marker or malformed tree header.
    #[error("Format error: {message}")]
    Format {
        /// Description of the format error.
        message: String,
    },

    /// End of stream reached while walking the tree, before the sentinel.
    #[error("Truncated body: stream ended at bit {bit_position} before the end-of-stream code")]
    TruncatedBody {
        /// Cumulative bits requested from the source when the stream ran out.
        bit_position: u64,
    },

    /// Bit width outside the supported range.
    #[error("Invalid bit width: {width} (must be 1-32)")]
    InvalidArgument {
        /// The rejected width.
        width: u32,
    },

    /// A declared but unimplemented feature was selected.
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Name of the feature.
        feature: String,
    },

    /// A code is longer than the code representation can hold.
    #[error("Code length {length} exceeds maximum {max}")]
    CodeTooLong {
        /// Length of the offending code.
        length: usize,
        /// Maximum supported length.
        max: usize,
    },

    /// The encoding pass met a symbol the counting pass never saw.
    #[error("No code for symbol {symbol}: input changed between passes")]
    MissingCode {
        /// The symbol without a code.
        symbol: u16,
    },
}

/// Result type alias for HuffArc operations.
pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a truncated body error.
    pub fn truncated_body(bit_position: u64) -> Self {
        Self::TruncatedBody { bit_position }
    }

    /// Create an invalid bit width error.
    pub fn invalid_width(width: u32) -> Self {
        Self::InvalidArgument { width }
    }

    /// Create a not implemented error.
    pub fn not_implemented(feature: impl Into<String>) -> Self {
        Self::NotImplemented {
            feature: feature.into(),
        }
    }

    /// Create a code too long error.
    pub fn code_too_long(length: usize, max: usize) -> Self {
        Self::CodeTooLong { length, max }
    }

    /// Create a missing code error.
    pub fn missing_code(symbol: u16) -> Self {
        Self::MissingCode { symbol }
    }

    /// Whether this error describes bad compressed data rather than a
    /// failing stream or a misuse of the API.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::Format { .. } | Self::TruncatedBody { .. })
    }
}
