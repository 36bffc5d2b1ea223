//! HuffArc CLI
//!
//! Two-pass Huffman compression of single files.

mod commands;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{cmd_compress, cmd_decompress, cmd_info, cmd_test};
use huffarc_core::HuffError;
use huffarc_core::bitstream::DEFAULT_BLOCK_SIZE;
use huffarc_huff::HeaderFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huffarc")]
#[command(author, version, about = "Pure Rust two-pass Huffman compressor")]
#[command(long_about = "
HuffArc compresses single files with a static Huffman code built from the
file's own byte frequencies. The code tree is stored in the output header.

Examples:
  huffarc compress notes.txt
  huffarc compress notes.txt -o notes.huff
  huffarc decompress notes.txt.hf
  huffarc info notes.txt.hf --json
  huffarc test notes.txt.hf
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (defaults to INPUT.hf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Header format written after the marker
        #[arg(long, value_enum, default_value = "tree")]
        header: HeaderArg,

        /// I/O block size in bytes
        #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: usize,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,

        /// Print statistics to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file (defaults to INPUT without .hf, or INPUT.unhf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// I/O block size in bytes
        #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: usize,

        /// Keep the partial output if decompression fails
        #[arg(short, long)]
        keep_partial: bool,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,

        /// Print statistics to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the header of a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Check that a compressed file decodes
    #[command(alias = "t")]
    Test {
        /// Compressed file to test
        input: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Header format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum HeaderArg {
    /// Preorder code tree (default)
    #[default]
    Tree,
    /// Symbol frequency table (reserved, not implemented)
    Counts,
}

impl From<HeaderArg> for HeaderFormat {
    fn from(arg: HeaderArg) -> Self {
        match arg {
            HeaderArg::Tree => HeaderFormat::Tree,
            HeaderArg::Counts => HeaderFormat::Counts,
        }
    }
}

/// Exit code for errors caused by the compressed data itself.
const EXIT_DATA_ERROR: i32 = 2;

fn exit_code(error: &(dyn std::error::Error + 'static)) -> i32 {
    match error.downcast_ref::<HuffError>() {
        Some(e) if e.is_data_error() => EXIT_DATA_ERROR,
        _ => 1,
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            header,
            block_size,
            force,
            verbose,
        } => cmd_compress(
            &input,
            output.as_deref(),
            header.into(),
            block_size,
            force,
            verbose,
        ),
        Commands::Decompress {
            input,
            output,
            block_size,
            keep_partial,
            force,
            verbose,
        } => cmd_decompress(
            &input,
            output.as_deref(),
            block_size,
            keep_partial,
            force,
            verbose,
        ),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Test { input, verbose } => cmd_test(&input, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(e.as_ref()));
    }
}
