//! Root progress file type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use abacus_progress::ProgressRecord;

/// Current schema version of the progress file.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Value of the `format` field that marks a progress file.
pub const FORMAT_TAG: &str = "abacus-progress";

/// Top-level structure written to the progress file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressFile {
    pub format: String,

    /// Schema version (for future migrations).
    pub schema_version: u32,

    /// When the file was first created.
    pub created_at: String,

    /// When the file was last saved.
    pub last_saved_at: String,

    pub progress: ProgressRecord,
}

impl ProgressFile {
    pub fn new(progress: ProgressRecord) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            format: FORMAT_TAG.to_string(),
            schema_version: CURRENT_SCHEMA_VERSION,
            created_at: now.clone(),
            last_saved_at: now,
            progress,
        }
    }

    /// Update the last saved timestamp.
    pub fn touch(&mut self) {
        self.last_saved_at = Utc::now().to_rfc3339();
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.last_saved_at)
    }
}

impl Default for ProgressFile {
    fn default() -> Self {
        Self::new(ProgressRecord::default())
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
