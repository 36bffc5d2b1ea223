//! Header format definitions.
//!
//! A compressed stream starts with a 32-bit marker naming its header
//! format. Two formats share the `0xFACE82xx` family: the tree header,
//! which serializes the Huffman tree itself, and the counts header, which
//! is reserved and has no reader or writer.

use constants::{COUNTS_HEADER_MAGIC, TREE_HEADER_MAGIC};

/// Header format of a compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderFormat {
    /// Preorder-serialized tree (the only implemented format).
    #[default]
    Tree,
    /// Frequency counts. Reserved; selecting it fails with `NotImplemented`.
    Counts,
}

impl HeaderFormat {
    /// Identify the format from a 32-bit marker.
    pub fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            TREE_HEADER_MAGIC => Some(Self::Tree),
            COUNTS_HEADER_MAGIC => Some(Self::Counts),
            _ => None,
        }
    }

    /// Get the 32-bit marker for this format.
    pub fn magic(&self) -> u32 {
        match self {
            Self::Tree => TREE_HEADER_MAGIC,
            Self::Counts => COUNTS_HEADER_MAGIC,
        }
    }

    /// Whether this format can be read and written.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Tree)
    }

    /// Get the format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Counts => "counts",
        }
    }
}

impl std::fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Format constants.
pub mod constants {
    /// Bits per input symbol.
    pub const BITS_PER_WORD: u32 = 8;
    /// Bits in the format marker.
    pub const BITS_PER_INT: u32 = 32;
    /// Number of byte symbols.
    pub const ALPHABET_SIZE: usize = 1 << BITS_PER_WORD;
    /// End-of-stream sentinel symbol (one past the last byte value).
    pub const END_OF_STREAM: u16 = ALPHABET_SIZE as u16;
    /// Width of a serialized symbol; one more than a byte so the sentinel fits.
    pub const SYMBOL_BITS: u32 = BITS_PER_WORD + 1;
    /// Marker family shared by both header formats.
    pub const MAGIC_BASE: u32 = 0xFACE_8200;
    /// Marker of the tree header.
    pub const TREE_HEADER_MAGIC: u32 = MAGIC_BASE | 1;
    /// Marker of the reserved counts header.
    pub const COUNTS_HEADER_MAGIC: u32 = MAGIC_BASE | 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_values() {
        assert_eq!(HeaderFormat::Tree.magic(), 0xFACE_8201);
        assert_eq!(HeaderFormat::Counts.magic(), 0xFACE_8202);
    }

    #[test]
    fn test_from_magic() {
        assert_eq!(HeaderFormat::from_magic(0xFACE_8201), Some(HeaderFormat::Tree));
        assert_eq!(
            HeaderFormat::from_magic(0xFACE_8202),
            Some(HeaderFormat::Counts)
        );
        assert_eq!(HeaderFormat::from_magic(0xFACE_8200), None);
        assert_eq!(HeaderFormat::from_magic(0), None);
    }

    #[test]
    fn test_only_tree_is_supported() {
        assert!(HeaderFormat::Tree.is_supported());
        assert!(!HeaderFormat::Counts.is_supported());
        assert_eq!(HeaderFormat::default(), HeaderFormat::Tree);
    }

    #[test]
    fn test_symbol_width_fits_sentinel() {
        assert_eq!(constants::END_OF_STREAM, 256);
        assert!((constants::END_OF_STREAM as u32) < (1 << constants::SYMBOL_BITS));
    }
}
