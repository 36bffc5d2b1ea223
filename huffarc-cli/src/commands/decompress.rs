//! Decompress command implementation.

use crate::utils::{create_output, decompressed_name, format_size, remove_partial};
use huffarc_huff::{HuffConfig, decompress_stream};
use std::fs::File;
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    block_size: usize,
    keep_partial: bool,
    force: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = HuffConfig::DEFAULT.with_block_size(block_size);
    let output = output.map_or_else(|| decompressed_name(input), Path::to_path_buf);

    let reader = File::open(input)?;
    let writer = create_output(input, &output, force)?;

    let stats = match decompress_stream(reader, writer, config) {
        Ok(stats) => stats,
        Err(e) => {
            if keep_partial {
                eprintln!("Partial output kept in {}", output.display());
            } else {
                remove_partial(&output);
            }
            return Err(e.into());
        }
    };

    if verbose {
        eprintln!("{} -> {}", input.display(), output.display());
        eprintln!("  Header: {} bits", stats.header_bits);
        eprintln!("  Input: {} bits", stats.input_bits);
        eprintln!("  Output: {}", format_size(stats.output_bytes));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cmd_compress;
    use huffarc_huff::HeaderFormat;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("huffarc-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_file_roundtrip_default_names() {
        let dir = scratch_dir("roundtrip");
        let input = dir.join("notes.txt");
        let data = b"she sells sea shells by the sea shore".repeat(10);
        std::fs::write(&input, &data).unwrap();

        cmd_compress(&input, None, HeaderFormat::Tree, 64, false, false).unwrap();
        let compressed = dir.join("notes.txt.hf");
        assert!(compressed.exists());

        // Refuses to clobber the original without --force.
        assert!(cmd_decompress(&compressed, None, 64, false, false, false).is_err());
        cmd_decompress(&compressed, None, 64, false, true, false).unwrap();
        assert_eq!(std::fs::read(&input).unwrap(), data);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_partial_output_removed() {
        let dir = scratch_dir("partial");
        let input = dir.join("data.bin");
        let data = b"abcabcabcabcabcabcabcabcabcabc".repeat(10);
        std::fs::write(&input, &data).unwrap();
        cmd_compress(&input, None, HeaderFormat::Tree, 8192, false, false).unwrap();

        let compressed = dir.join("data.bin.hf");
        let mut bytes = std::fs::read(&compressed).unwrap();
        bytes.truncate(bytes.len() - 2);
        let truncated = dir.join("cut");
        std::fs::write(&truncated, &bytes).unwrap();

        let output = dir.join("out");
        let err = cmd_decompress(&truncated, Some(&output), 8192, false, false, false)
            .unwrap_err();
        assert!(err.downcast_ref::<huffarc_huff::HuffError>().is_some());
        assert!(!output.exists());

        cmd_decompress(&truncated, Some(&output), 8192, true, false, false).unwrap_err();
        let partial = std::fs::read(&output).unwrap();
        assert!(!partial.is_empty());
        assert!(partial.len() < data.len());
        assert!(data.starts_with(&partial));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_counts_header_leaves_no_output() {
        let dir = scratch_dir("counts");
        let input = dir.join("data");
        std::fs::write(&input, b"xyz").unwrap();

        let err = cmd_compress(&input, None, HeaderFormat::Counts, 8192, false, false)
            .unwrap_err();
        assert!(err.to_string().contains("counts"));
        assert!(!dir.join("data.hf").exists());

        // An existing output survives a rejected header even with --force.
        std::fs::write(dir.join("data.hf"), b"previous").unwrap();
        cmd_compress(&input, None, HeaderFormat::Counts, 8192, true, false).unwrap_err();
        assert_eq!(std::fs::read(dir.join("data.hf")).unwrap(), b"previous");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
