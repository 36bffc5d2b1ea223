//! Info command implementation.

use crate::utils::{format_size, symbol_label};
use huffarc_huff::{BitSource, HeaderFormat, read_header};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// JSON serializable code length of one symbol.
#[derive(Debug, Serialize)]
struct CodeLengthJson {
    symbol: u16,
    length: usize,
}

/// JSON output for header inspection.
#[derive(Debug, Serialize)]
struct InfoJson {
    file: String,
    size: u64,
    magic: String,
    format: String,
    leaf_count: usize,
    depth: usize,
    header_bits: u64,
    code_lengths: Vec<CodeLengthJson>,
}

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(input)?;
    let size = file.metadata()?.len();

    let mut source = BitSource::new(file)?;
    let header = read_header(&mut source)?;
    let codes = header.tree.codes()?;
    let format = HeaderFormat::from_magic(header.magic).unwrap_or_default();

    if json {
        let info = InfoJson {
            file: input.display().to_string(),
            size,
            magic: format!("{:#010x}", header.magic),
            format: format.name().to_string(),
            leaf_count: header.tree.leaf_count(),
            depth: header.tree.depth(),
            header_bits: header.header_bits,
            code_lengths: codes
                .iter()
                .map(|(symbol, code)| CodeLengthJson {
                    symbol,
                    length: code.len(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Compressed File Information");
    println!("===========================");
    println!("File: {}", input.display());
    println!("Size: {}", format_size(size));
    println!("Marker: {:#010x}", header.magic);
    println!("Header format: {}", format);
    println!("Header size: {} bits", header.header_bits);
    println!();
    println!("Code tree:");
    println!("  Leaves: {}", header.tree.leaf_count());
    println!("  Depth: {}", header.tree.depth());
    println!();
    println!("Codes:");
    for (symbol, code) in codes.iter() {
        println!("  {:>6}  {:>3}  {}", symbol_label(symbol), code.len(), code);
    }

    Ok(())
}
