//! Progress loading operations.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use abacus_progress::{CurriculumConfig, LevelRegistry, ProgressStore};
use serde_json::Value;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, FORMAT_TAG, ProgressFile};

/// Load progress from a JSON file.
pub fn load_progress(path: &Path) -> Result<ProgressFile> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_progress_bytes(&bytes, path)
}

/// Load progress, or start a new file when none exists yet.
pub fn load_or_new(path: &Path) -> Result<ProgressFile> {
    match fs::metadata(path) {
        Ok(_) => load_progress(path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No progress file at {}, starting fresh", path.display());
            Ok(ProgressFile::default())
        }
        Err(e) => Err(PersistenceError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Rebuild the engine store from a loaded file.
///
/// Unlock and completion state is derived from the counters; nothing in the
/// file can override it.
pub fn restore_store(
    file: &ProgressFile,
    registry: LevelRegistry,
    config: CurriculumConfig,
) -> Result<ProgressStore> {
    Ok(ProgressStore::from_record(registry, config, &file.progress)?)
}

/// Validate the envelope before decoding the payload, so newer files are
/// reported as a version problem rather than a decode failure.
fn parse_progress_bytes(bytes: &[u8], path: &Path) -> Result<ProgressFile> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|source| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(object) = value.as_object() else {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "Top-level value is not an object".to_string(),
        });
    };

    if object.get("format").and_then(Value::as_str) != Some(FORMAT_TAG) {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!("Missing \"format\": \"{FORMAT_TAG}\" marker"),
        });
    }

    let version = object
        .get("schema_version")
        .and_then(Value::as_u64)
        .ok_or_else(|| PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "Missing schema_version".to_string(),
        })?;

    if version > u64::from(CURRENT_SCHEMA_VERSION) {
        return Err(PersistenceError::UnsupportedVersion {
            found: u32::try_from(version).unwrap_or(u32::MAX),
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    let file: ProgressFile =
        serde_json::from_value(value).map_err(|source| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!("Loaded progress from {}", path.display());
    Ok(file)
}
