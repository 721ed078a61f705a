//! Curriculum policy configuration.
//!
//! All tunable policy lives here so the thresholds are defined once.
//! A config file is TOML:
//!
//! ```toml
//! [mastery]
//! min_attempts = 10
//! mastery_ratio = 0.8
//!
//! [unlock]
//! gate_mixed_operation = false
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::Path;

use abacus_model::LevelStats;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Answers required on a level before it can count as completed.
pub const DEFAULT_MIN_ATTEMPTS: u32 = 10;

/// Share of correct answers required for completion.
pub const DEFAULT_MASTERY_RATIO: f64 = 0.8;

/// Threshold a level's statistics must meet to be completed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryPolicy {
    /// Minimum number of answered questions.
    pub min_attempts: u32,

    /// Minimum `correct / attempted` ratio, in `(0, 1]`.
    pub mastery_ratio: f64,
}

impl Default for MasteryPolicy {
    fn default() -> Self {
        Self {
            min_attempts: DEFAULT_MIN_ATTEMPTS,
            mastery_ratio: DEFAULT_MASTERY_RATIO,
        }
    }
}

impl MasteryPolicy {
    /// Whether `stats` meets this threshold.
    pub fn is_mastered(&self, stats: &LevelStats) -> bool {
        if stats.questions_completed() < self.min_attempts {
            return false;
        }
        stats
            .accuracy()
            .is_some_and(|accuracy| accuracy >= self.mastery_ratio)
    }

    /// Correct answers still needed for completion if every further answer
    /// is correct. `Some(0)` once mastered, `None` when no run of correct
    /// answers can reach the threshold (a ratio of 1.0 after a mistake).
    pub fn answers_remaining(&self, stats: &LevelStats) -> Option<u32> {
        if self.is_mastered(stats) {
            return Some(0);
        }
        let attempted = f64::from(stats.questions_completed());
        let correct = f64::from(stats.correct_answers());
        let ratio = self.mastery_ratio;

        let by_attempts = self.min_attempts.saturating_sub(stats.questions_completed());
        let by_ratio = if correct >= ratio * attempted {
            0
        } else if ratio >= 1.0 {
            return None;
        } else {
            // Solve (c + k) / (a + k) >= r for k.
            ((ratio * attempted - correct) / (1.0 - ratio)).ceil() as u32
        };

        // The float estimate can be off by one either way.
        let estimate = by_attempts.max(by_ratio).saturating_sub(1);
        (estimate..=estimate.saturating_add(2)).find(|&extra| {
            let projected = stats
                .questions_completed()
                .checked_add(extra)
                .zip(stats.correct_answers().checked_add(extra))
                .and_then(|(q, c)| LevelStats::new(q, c).ok());
            projected.is_some_and(|projected| self.is_mastered(&projected))
        })
    }
}

/// Rules that add prerequisites beyond the per-operation chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnlockPolicy {
    /// Keep the mixed-operation curriculum locked until both the addition
    /// and the subtraction chains are finished.
    pub gate_mixed_operation: bool,
}

/// Complete policy for one curriculum instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurriculumConfig {
    pub mastery: MasteryPolicy,
    pub unlock: UnlockPolicy,
}

impl CurriculumConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mastery(mut self, min_attempts: u32, mastery_ratio: f64) -> Self {
        self.mastery = MasteryPolicy {
            min_attempts,
            mastery_ratio,
        };
        self
    }

    #[must_use]
    pub fn with_mixed_gate(mut self, enable: bool) -> Self {
        self.unlock.gate_mixed_operation = enable;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Toml { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            min_attempts = config.mastery.min_attempts,
            mastery_ratio = config.mastery.mastery_ratio,
            gate_mixed_operation = config.unlock.gate_mixed_operation,
            "loaded curriculum config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mastery.min_attempts == 0 {
            return Err(ConfigError::Invalid {
                message: "mastery.min_attempts must be at least 1".to_string(),
            });
        }
        let ratio = self.mastery.mastery_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::Invalid {
                message: format!("mastery.mastery_ratio must be in (0, 1], got {ratio}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(attempts: u32, correct: u32) -> LevelStats {
        LevelStats::new(attempts, correct).unwrap()
    }

    #[test]
    fn default_policy_needs_ten_answers_at_eighty_percent() {
        let policy = MasteryPolicy::default();
        assert!(!policy.is_mastered(&stats(9, 9)));
        assert!(policy.is_mastered(&stats(10, 10)));
        assert!(policy.is_mastered(&stats(10, 8)));
        assert!(!policy.is_mastered(&stats(10, 7)));
        assert!(policy.is_mastered(&stats(20, 16)));
        assert!(!policy.is_mastered(&stats(0, 0)));
    }

    #[test]
    fn answers_remaining_counts_correct_answers_to_mastery() {
        let policy = MasteryPolicy::default();
        assert_eq!(policy.answers_remaining(&stats(0, 0)), Some(10));
        assert_eq!(policy.answers_remaining(&stats(4, 4)), Some(6));
        assert_eq!(policy.answers_remaining(&stats(10, 10)), Some(0));
        // 10 answered, 5 correct: needs 15 more correct to reach 20/25.
        assert_eq!(policy.answers_remaining(&stats(10, 5)), Some(15));
    }

    #[test]
    fn perfect_ratio_is_unreachable_after_a_mistake() {
        let policy = MasteryPolicy {
            min_attempts: 3,
            mastery_ratio: 1.0,
        };
        assert_eq!(policy.answers_remaining(&stats(2, 1)), None);
        assert_eq!(policy.answers_remaining(&stats(1, 1)), Some(2));
    }

    #[test]
    fn toml_fields_are_optional() {
        let config = CurriculumConfig::from_toml_str("").unwrap();
        assert_eq!(config, CurriculumConfig::default());

        let config = CurriculumConfig::from_toml_str(
            "[mastery]\nmin_attempts = 5\n\n[unlock]\ngate_mixed_operation = true\n",
        )
        .unwrap();
        assert_eq!(config.mastery.min_attempts, 5);
        assert_eq!(config.mastery.mastery_ratio, DEFAULT_MASTERY_RATIO);
        assert!(config.unlock.gate_mixed_operation);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CurriculumConfig::from_toml_str("[mastery]\nmin_attempts = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = CurriculumConfig::from_toml_str("[mastery]\nmastery_ratio = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = CurriculumConfig::from_toml_str("[mastery]\nmin_attempts = \"ten\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curriculum.toml");
        std::fs::write(&path, "[mastery]\nmastery_ratio = 0.9\n").unwrap();
        let config = CurriculumConfig::load(&path).unwrap();
        assert_eq!(config.mastery.mastery_ratio, 0.9);

        let missing = CurriculumConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
