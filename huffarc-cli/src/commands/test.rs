//! Test command implementation.

use huffarc_huff::{BitSink, BitSource, HuffDecoder};
use std::fs::File;
use std::path::Path;

pub fn cmd_test(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(input)?;
    println!("Testing {}", input.display());

    let mut source = BitSource::new(file)?;
    let mut sink = BitSink::new(std::io::sink());

    match HuffDecoder::new().decompress(&mut source, &mut sink) {
        Ok(stats) => {
            sink.finish()?;
            if verbose {
                println!("  Header: {} bits", stats.header_bits);
                println!("  Body: {} bits", stats.input_bits - stats.header_bits);
                println!("  Decoded: {} bytes", stats.output_bytes);
            }
            println!("OK");
            Ok(())
        }
        Err(e) if e.is_data_error() => {
            println!("  FAILED: {}", e);
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}
