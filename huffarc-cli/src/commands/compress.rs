//! Compress command implementation.

use crate::utils::{compressed_name, create_output, format_size, remove_partial};
use huffarc_huff::{HeaderFormat, HuffConfig, HuffError, compress_stream};
use std::fs::File;
use std::path::Path;

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    header: HeaderFormat,
    block_size: usize,
    force: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = HuffConfig::DEFAULT
        .with_header(header)
        .with_block_size(block_size);
    if !header.is_supported() {
        return Err(HuffError::not_implemented(format!("{} header", header)).into());
    }
    let output = output.map_or_else(|| compressed_name(input), Path::to_path_buf);

    let reader = File::open(input)?;
    let writer = create_output(input, &output, force)?;

    let stats = match compress_stream(reader, writer, config) {
        Ok(stats) => stats,
        Err(e) => {
            remove_partial(&output);
            return Err(e.into());
        }
    };

    if verbose {
        eprintln!("{} -> {}", input.display(), output.display());
        eprintln!("  Header format: {}", config.header);
        eprintln!("  Input: {}", format_size(stats.input_bytes));
        eprintln!("  Output: {}", format_size(stats.output_bytes()));
        eprintln!("  Distinct bytes: {}", stats.alphabet_size);
        eprintln!("  Header: {} bits", stats.header_bits);
        eprintln!("  Body: {} bits", stats.body_bits);
        if stats.input_bytes > 0 {
            eprintln!("  Ratio: {:.1}%", stats.ratio() * 100.0);
        }
    }

    Ok(())
}
