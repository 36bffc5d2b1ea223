//! Utility functions for the CLI.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Extension given to compressed files.
pub const COMPRESSED_EXTENSION: &str = "hf";

/// Extension given to decompressed files whose name does not end in `.hf`.
pub const FALLBACK_EXTENSION: &str = "unhf";

/// Append `.ext` to the full file name, keeping any existing extension.
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Default output path for `compress`: `INPUT.hf`.
pub fn compressed_name(input: &Path) -> PathBuf {
    append_extension(input, COMPRESSED_EXTENSION)
}

/// Default output path for `decompress`: strip `.hf`, else append `.unhf`.
pub fn decompressed_name(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == COMPRESSED_EXTENSION && input.file_stem().is_some() => {
            input.with_extension("")
        }
        _ => append_extension(input, FALLBACK_EXTENSION),
    }
}

/// Whether two paths name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Create the output file, refusing to clobber the input or an existing
/// file unless `force` is set.
pub fn create_output(
    input: &Path,
    output: &Path,
    force: bool,
) -> Result<File, Box<dyn std::error::Error>> {
    if same_file(input, output) {
        return Err(format!("output {} would overwrite the input", output.display()).into());
    }
    if output.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )
        .into());
    }
    Ok(File::create(output)?)
}

/// Remove a partially written output file, reporting but not failing on
/// errors.
pub fn remove_partial(output: &Path) {
    if let Err(e) = std::fs::remove_file(output) {
        eprintln!(
            "Warning: could not remove partial output {}: {}",
            output.display(),
            e
        );
    }
}

/// Format a byte count for humans.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Printable form of a symbol for listings.
pub fn symbol_label(symbol: u16) -> String {
    match u8::try_from(symbol) {
        Ok(byte) if byte.is_ascii_graphic() => format!("'{}'", byte as char),
        Ok(byte) => format!("0x{:02x}", byte),
        Err(_) => "EOS".to_string(),
    }
}
