//! Recipe pack discovery and parsing.
//!
//! A pack is a single data file (`<base>.json`, `<base>.ron`, or
//! `<base>.toml`) whose top level maps arbitrary keys to recipe records.
//! Whatever the on-disk format, the document is parsed into a generic
//! `serde_json::Value`; the ingestion pipeline is format-agnostic.

use serde_json::Value;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while locating or parsing a recipe pack. Every
/// variant is fatal for the ingestion run but never escapes the pipeline:
/// the caller converts it into an error diagnostic and registers nothing.
#[derive(Debug, thiserror::Error)]
pub enum PackLoadError {
    /// No pack file with the given base name exists in the directory.
    #[error("no recipe pack '{base_name}' found in {dir}")]
    MissingPack { base_name: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for pack file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two pack files with the same base name but different formats exist.
    #[error("conflicting pack formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported pack file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Ron,
    Toml,
}

/// Detect the format of a pack file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, PackLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        _ => Err(PackLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a pack file with the given base name (without
/// extension).
///
/// Looks for `{base_name}.json`, `{base_name}.ron`, and `{base_name}.toml`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_pack_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, PackLoadError> {
    let extensions = ["json", "ron", "toml"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(PackLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Parsing
// ===========================================================================

/// Read a pack file and parse it into a generic JSON value according to its
/// format (detected from the extension).
pub fn read_pack(path: &Path) -> Result<Value, PackLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let parse_err = |detail: String| PackLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string())),
        Format::Ron => ron::from_str(&content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => {
            let table: toml::Value =
                toml::from_str(&content).map_err(|e| parse_err(e.to_string()))?;
            serde_json::to_value(table).map_err(|e| parse_err(e.to_string()))
        }
    }
}

/// Locate and parse the pack with the given base name in `dir`.
pub fn load_pack(dir: &Path, base_name: &str) -> Result<Value, PackLoadError> {
    let path = find_pack_file(dir, base_name)?.ok_or_else(|| PackLoadError::MissingPack {
        base_name: base_name.to_string(),
        dir: dir.to_path_buf(),
    })?;
    read_pack(&path)
}

// ===========================================================================
// Tests
// ===========================================================================
