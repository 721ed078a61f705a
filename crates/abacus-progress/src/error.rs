//! Progress engine error types.

use abacus_model::LevelId;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a progress store operation.
///
/// Every failing operation leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    /// The identifier is not part of the curriculum.
    #[error("unknown level: {id}")]
    UnknownLevel { id: LevelId },

    /// The level cannot be selected until its prerequisites are mastered.
    #[error("level is locked: {id}")]
    LevelLocked { id: LevelId },

    /// The change would leave more correct answers than questions.
    #[error(
        "invalid statistics for {id}: {correct_answers} correct out of {questions_completed}"
    )]
    InvalidStatistics {
        id: LevelId,
        questions_completed: u32,
        correct_answers: u32,
    },

    /// A writer panicked while holding the shared store.
    #[error("progress store lock poisoned")]
    Poisoned,
}

impl ProgressError {
    /// Message suitable for showing to a learner.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownLevel { id } => format!("There is no practice level called '{id}'."),
            Self::LevelLocked { id } => {
                format!("'{id}' is still locked. Master the previous level first.")
            }
            Self::InvalidStatistics { id, .. } => {
                format!("The saved results for '{id}' are inconsistent and were not applied.")
            }
            Self::Poisoned => "Progress could not be updated. Please restart the app.".to_string(),
        }
    }

    /// True for the expected, recoverable outcome of picking a locked level.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::LevelLocked { .. })
    }
}

/// Failure to read or validate curriculum configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {source}")]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

pub type Result<T> = std::result::Result<T, ProgressError>;
