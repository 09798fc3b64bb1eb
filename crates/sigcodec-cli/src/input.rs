//! Spec loading.
//!
//! Reads a transmit spec from disk and records the hash of the exact bytes
//! read, so reports can be traced back to a source file.

use sigcodec_spec::{source_hash, TransmitSpec};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Recognized spec extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Result of loading a spec file.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed spec.
    pub spec: TransmitSpec,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur during spec loading.
#[derive(Debug, Error)]
pub enum InputError {
    /// File could not be read.
    #[error("failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unknown file extension.
    #[error("{}", unknown_extension_message(extension.as_deref()))]
    UnknownExtension { extension: Option<String> },

    /// JSON parsing failed.
    #[error("JSON parse error: {message}")]
    JsonParse { message: String },
}

fn unknown_extension_message(extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("unknown file extension '.{}' (expected .json)", ext),
        None => "file has no extension (expected .json)".to_string(),
    }
}

/// Load a spec from a file path.
///
/// # Arguments
/// * `path` - Path to the spec file (.json)
///
/// # Returns
/// * `Ok(LoadResult)` - Successfully loaded and parsed spec
/// * `Err(InputError)` - File read or parse error
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use sigcodec_cli::input::load_spec;
///
/// let result = load_spec(Path::new("spec.json")).unwrap();
/// println!("Loaded {} ({})", result.spec.transmit_id, result.source_hash);
/// ```
pub fn load_spec(path: &Path) -> Result<LoadResult, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some(ext) if JSON_EXTENSIONS.contains(&ext) => load_json_spec(path),
        _ => Err(InputError::UnknownExtension { extension }),
    }
}

fn load_json_spec(path: &Path) -> Result<LoadResult, InputError> {
    let bytes = std::fs::read(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let hash = source_hash(&bytes);

    let spec: TransmitSpec =
        serde_json::from_slice(&bytes).map_err(|e| InputError::JsonParse {
            message: e.to_string(),
        })?;

    Ok(LoadResult {
        spec,
        source_hash: hash,
    })
}
