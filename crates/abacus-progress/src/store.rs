//! The progress store: sole owner of a learner's mutable progress.
//!
//! Front ends and the question generator hold a `ProgressStore` (or a
//! [`crate::SharedProgressStore`]) and go through it for every change.
//! Derived state is read back through [`ProgressStore::unlock_map`],
//! [`ProgressStore::summary`] and [`ProgressStore::level_views`].

use abacus_model::{Level, LevelId, LevelStats, Operation};
use tracing::{debug, info};

use crate::aggregate::{LevelView, ProgressSummary};
use crate::config::CurriculumConfig;
use crate::error::{ProgressError, Result};
use crate::registry::LevelRegistry;
use crate::snapshot::ProgressSnapshot;
use crate::unlock::{UnlockMap, compute_unlocked, is_completed};

/// Result of recording one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub level: LevelId,
    /// Statistics after the answer was applied.
    pub stats: LevelStats,
    pub completed: bool,
    /// The answer pushed the level over the mastery threshold.
    pub newly_completed: bool,
    /// Levels that became unlocked because of this answer.
    pub newly_unlocked: Vec<LevelId>,
}

/// Owned learner progress plus the curriculum it is measured against.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    registry: LevelRegistry,
    config: CurriculumConfig,
    progress: ProgressSnapshot,
    /// Cached projection of `progress`; rebuilt whenever a completion flag
    /// changes.
    unlocked: UnlockMap,
}

impl ProgressStore {
    /// A store with zero statistics for every level.
    pub fn new(registry: LevelRegistry, config: CurriculumConfig) -> Self {
        let progress = ProgressSnapshot::empty(&registry);
        Self::from_parts(registry, config, progress)
    }

    pub(crate) fn from_parts(
        registry: LevelRegistry,
        config: CurriculumConfig,
        progress: ProgressSnapshot,
    ) -> Self {
        let unlocked = compute_unlocked(&registry, &progress, &config);
        Self {
            registry,
            config,
            progress,
            unlocked,
        }
    }

    pub fn registry(&self) -> &LevelRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CurriculumConfig {
        &self.config
    }

    pub fn current_level(&self) -> Option<&LevelId> {
        self.progress.current_level()
    }

    /// Apply one answer outcome to `level_id`.
    ///
    /// # Errors
    ///
    /// - `UnknownLevel` if the id is not registered.
    /// - `InvalidStatistics` if a counter would overflow.
    ///
    /// On error the store is unchanged.
    pub fn record_answer(&mut self, level_id: &LevelId, was_correct: bool) -> Result<AnswerOutcome> {
        self.registry.resolve(level_id)?;
        let before = self.progress.stats_or_default(level_id);
        let after = before
            .record(was_correct)
            .ok_or_else(|| ProgressError::InvalidStatistics {
                id: level_id.clone(),
                questions_completed: before.questions_completed(),
                correct_answers: before.correct_answers(),
            })?;

        let slot = self
            .progress
            .stats_mut(level_id)
            .ok_or_else(|| ProgressError::UnknownLevel {
                id: level_id.clone(),
            })?;
        *slot = after;

        let was_completed = is_completed(&before, &self.config.mastery);
        let completed = is_completed(&after, &self.config.mastery);
        debug!(
            level = %level_id,
            was_correct,
            questions = after.questions_completed(),
            correct = after.correct_answers(),
            "recorded answer"
        );

        let newly_unlocked = if was_completed == completed {
            Vec::new()
        } else {
            self.refresh_unlocks()
        };
        if completed && !was_completed {
            info!(level = %level_id, "level completed");
        }

        Ok(AnswerOutcome {
            level: level_id.clone(),
            stats: after,
            completed,
            newly_completed: completed && !was_completed,
            newly_unlocked,
        })
    }

    /// Make `level_id` the learner's current level.
    ///
    /// # Errors
    ///
    /// - `UnknownLevel` if the id is not registered.
    /// - `LevelLocked` if the level is not unlocked; the current level is
    ///   left as it was.
    pub fn set_current_level(&mut self, level_id: &LevelId) -> Result<()> {
        self.registry.resolve(level_id)?;
        if !self.unlocked.is_unlocked(level_id) {
            debug!(level = %level_id, "refused to select locked level");
            return Err(ProgressError::LevelLocked {
                id: level_id.clone(),
            });
        }
        if self.progress.current_level() != Some(level_id) {
            info!(level = %level_id, "current level changed");
        }
        self.progress.set_current_level(Some(level_id.clone()));
        Ok(())
    }

    /// Forget the current level pointer.
    pub fn clear_current_level(&mut self) {
        self.progress.set_current_level(None);
    }

    /// Owned copy of the progress state.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.progress.clone()
    }

    pub fn stats(&self, level_id: &LevelId) -> Result<LevelStats> {
        self.registry.resolve(level_id)?;
        Ok(self.progress.stats_or_default(level_id))
    }

    pub fn unlock_map(&self) -> &UnlockMap {
        &self.unlocked
    }

    pub fn is_unlocked(&self, level_id: &LevelId) -> Result<bool> {
        self.registry.resolve(level_id)?;
        Ok(self.unlocked.is_unlocked(level_id))
    }

    pub fn is_completed(&self, level_id: &LevelId) -> Result<bool> {
        self.registry.resolve(level_id)?;
        Ok(is_completed(
            &self.progress.stats_or_default(level_id),
            &self.config.mastery,
        ))
    }

    /// Aggregated progress, derived from the current state on every call.
    pub fn summary(&self) -> ProgressSummary<'_> {
        ProgressSummary::new(&self.registry, &self.progress, &self.unlocked, &self.config)
    }

    /// One row per level, in registry order.
    pub fn level_views(&self) -> Vec<LevelView> {
        self.summary().level_views()
    }

    /// The level to practise next within `operation`: the first unlocked
    /// level in chain order that is not yet completed.
    pub fn recommended_level(&self, operation: Operation) -> Option<&Level> {
        self.registry.operation_levels(operation).find(|level| {
            self.unlocked.is_unlocked(&level.id)
                && !is_completed(
                    &self.progress.stats_or_default(&level.id),
                    &self.config.mastery,
                )
        })
    }

    /// Recompute the unlock cache and report what changed.
    fn refresh_unlocks(&mut self) -> Vec<LevelId> {
        let refreshed = compute_unlocked(&self.registry, &self.progress, &self.config);
        let newly_unlocked = refreshed.newly_unlocked(&self.unlocked);
        for id in &newly_unlocked {
            info!(level = %id, "level unlocked");
        }
        self.unlocked = refreshed;
        newly_unlocked
    }
}
