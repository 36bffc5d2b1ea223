//! Prefix codes derived from a Huffman tree.
//!
//! Each code is stored as an explicit `(bits, len)` pair rather than as a
//! string of digits, so code length is limited only by the width of the
//! pattern integer.

use crate::format::constants::END_OF_STREAM;
use crate::tree::{CodeNode, CodeTree};
use huffarc_core::bitstream::{BitSink, MAX_BITS};
use huffarc_core::error::{HuffError, Result};
use std::io::Write;

/// Maximum code length in bits.
///
/// A tree built from `u64` counts is shallower than 93 levels: a leaf at
/// depth `d` needs a total weight of at least Fib(d + 2).
pub const MAX_CODE_LENGTH: usize = u128::BITS as usize;

/// A variable-length code, MSB-first in the low `len` bits of `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// The zero-length code of a single-leaf tree.
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    /// Create a code from its pattern and length.
    ///
    /// Bits above `len` are cleared.
    pub fn new(bits: u128, len: usize) -> Result<Self> {
        if len > MAX_CODE_LENGTH {
            return Err(HuffError::code_too_long(len, MAX_CODE_LENGTH));
        }
        let bits = if len == MAX_CODE_LENGTH {
            bits
        } else {
            bits & ((1u128 << len) - 1)
        };
        Ok(Self {
            bits,
            len: len as u8,
        })
    }

    /// The bit pattern.
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether this is the zero-length code.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit.
    fn push(self, bit: bool) -> Result<Self> {
        if self.len() >= MAX_CODE_LENGTH {
            return Err(HuffError::code_too_long(self.len() + 1, MAX_CODE_LENGTH));
        }
        Ok(Self {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        })
    }

    /// Write the code to `sink` in chunks of at most 32 bits.
    ///
    /// The zero-length code writes nothing.
    pub fn write_to<W: Write>(&self, sink: &mut BitSink<W>) -> Result<()> {
        let mut remaining = self.len as u32;
        while remaining > 0 {
            let chunk = remaining.min(MAX_BITS);
            remaining -= chunk;
            sink.write_bits((self.bits >> remaining) as u32, chunk)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in (0..self.len).rev() {
            let bit = (self.bits >> i) & 1;
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Symbol → code mapping for the 256 byte values plus the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Walk `tree`, appending `0` on every left edge and `1` on every right
    /// edge.
    pub fn from_tree(tree: &CodeTree) -> Result<Self> {
        let mut codes = vec![None; END_OF_STREAM as usize + 1];
        let mut stack: Vec<(&CodeNode, Code)> = vec![(tree.root(), Code::EMPTY)];

        while let Some((node, code)) = stack.pop() {
            match node {
                CodeNode::Leaf { symbol, .. } => {
                    if let Some(slot) = codes.get_mut(*symbol as usize) {
                        *slot = Some(code);
                    }
                }
                CodeNode::Internal { left, right, .. } => {
                    stack.push((right, code.push(true)?));
                    stack.push((left, code.push(false)?));
                }
            }
        }

        Ok(Self { codes })
    }

    /// Look up the code of `symbol`.
    pub fn get(&self, symbol: u16) -> Option<Code> {
        self.codes.get(symbol as usize).copied().flatten()
    }

    /// Iterate over `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|code| (symbol as u16, code)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(data: &[u8]) -> [u64; 256] {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        counts
    }

    #[test]
    fn test_code_display() {
        let code = Code::new(0b0011, 4).unwrap();
        assert_eq!(code.to_string(), "0011");
        assert_eq!(Code::EMPTY.to_string(), "");
    }

    #[test]
    fn test_code_new_masks_and_limits() {
        let code = Code::new(0xFF, 3).unwrap();
        assert_eq!(code.bits(), 0b111);
        assert!(Code::new(u128::MAX, MAX_CODE_LENGTH).is_ok());
        assert!(matches!(
            Code::new(0, MAX_CODE_LENGTH + 1),
            Err(HuffError::CodeTooLong { length: 129, .. })
        ));
    }

    #[test]
    fn test_long_code_written_in_chunks() {
        let pattern = 0x0123_4567_89AB_CDEF_FEDC_BA98_7654_3210u128;
        let code = Code::new(pattern, 128).unwrap();
        let mut sink = BitSink::new(Vec::new());
        code.write_to(&mut sink).unwrap();
        assert_eq!(sink.finish().unwrap(), pattern.to_be_bytes().to_vec());
    }

    #[test]
    fn test_empty_code_writes_nothing() {
        let mut sink = BitSink::new(Vec::new());
        Code::EMPTY.write_to(&mut sink).unwrap();
        assert_eq!(sink.bits_written(), 0);
    }

    #[test]
    fn test_codes_for_aaab() {
        let tree = CodeTree::from_counts(&counts_of(b"AAAB"));
        let table = CodeTable::from_tree(&tree).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'A' as u16).unwrap().to_string(), "1");
        assert_eq!(table.get(b'B' as u16).unwrap().to_string(), "00");
        assert_eq!(table.get(END_OF_STREAM).unwrap().to_string(), "01");
        assert_eq!(table.get(b'C' as u16), None);
        assert_eq!(table.max_len(), 2);
    }

    #[test]
    fn test_single_leaf_gets_empty_code() {
        let tree = CodeTree::from_counts(&[0u64; 256]);
        let table = CodeTable::from_tree(&tree).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(END_OF_STREAM), Some(Code::EMPTY));
    }

    #[test]
    fn test_codes_are_prefix_free() {
        let data: Vec<u8> = (0..4000u32).map(|i| (i * i % 251) as u8).collect();
        let tree = CodeTree::from_counts(&counts_of(&data));
        let table = CodeTable::from_tree(&tree).unwrap();
        let codes: Vec<Code> = table.iter().map(|(_, code)| code).collect();

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i == j || a.len() > b.len() {
                    continue;
                }
                let prefix = b.bits() >> (b.len() - a.len());
                assert_ne!(prefix, a.bits(), "{} is a prefix of {}", a, b);
            }
        }
    }

    #[test]
    fn test_skewed_counts_exceed_machine_word() {
        // Fibonacci weights degrade the tree into a chain.
        let mut counts = [0u64; 256];
        let (mut a, mut b) = (1u64, 2u64);
        for count in counts.iter_mut().take(70) {
            *count = a;
            let next = a + b;
            a = b;
            b = next;
        }
        let tree = CodeTree::from_counts(&counts);
        let table = CodeTable::from_tree(&tree).unwrap();
        assert!(table.max_len() > 64);
        assert!(table.max_len() <= MAX_CODE_LENGTH);
    }
}
