//! Progress saving operations.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{PersistenceError, Result};
use crate::types::ProgressFile;

/// Save progress to a JSON file.
///
/// Uses atomic write (temp file + rename) so a crash mid-save leaves the
/// previous file intact.
pub fn save_progress(file: &mut ProgressFile, path: &Path) -> Result<()> {
    file.touch();

    let mut bytes = serde_json::to_vec_pretty(file)
        .map_err(|source| PersistenceError::Serialization { source })?;
    bytes.push(b'\n');

    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut out = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    out.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    out.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    drop(out);

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        levels = file.progress.levels.len(),
        "Saved progress to {}",
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_progress() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut file = ProgressFile::default();
        save_progress(&mut file, &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"format\": \"abacus-progress\""));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("learners").join("ana").join("progress.json");

        save_progress(&mut ProgressFile::default(), &path).unwrap();
        assert!(path.exists());
    }
}
