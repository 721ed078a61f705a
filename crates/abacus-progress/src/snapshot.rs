//! Immutable copies of learner progress used for derived computation.

use std::collections::BTreeMap;

use abacus_model::{LevelId, LevelStats};

use crate::error::{ProgressError, Result};
use crate::registry::LevelRegistry;

/// Read-only view of a learner's progress at one moment.
///
/// Holds owned data, so later store mutations never show through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    current_level: Option<LevelId>,
    stats: BTreeMap<LevelId, LevelStats>,
}

impl ProgressSnapshot {
    /// Zero statistics for every registry level and no current level.
    pub fn empty(registry: &LevelRegistry) -> Self {
        Self {
            current_level: None,
            stats: registry
                .levels()
                .iter()
                .map(|level| (level.id.clone(), LevelStats::default()))
                .collect(),
        }
    }

    /// Start from zero and overlay `entries`. Every id must be registered.
    pub fn from_stats<I>(registry: &LevelRegistry, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (LevelId, LevelStats)>,
    {
        let mut snapshot = Self::empty(registry);
        for (id, stats) in entries {
            match snapshot.stats.get_mut(&id) {
                Some(slot) => *slot = stats,
                None => return Err(ProgressError::UnknownLevel { id }),
            }
        }
        Ok(snapshot)
    }

    pub(crate) fn with_current_level(mut self, current_level: Option<LevelId>) -> Self {
        self.current_level = current_level;
        self
    }

    pub fn current_level(&self) -> Option<&LevelId> {
        self.current_level.as_ref()
    }

    pub fn stats(&self, id: &LevelId) -> Option<&LevelStats> {
        self.stats.get(id)
    }

    /// Statistics for `id`, zero when the id is not present.
    pub fn stats_or_default(&self, id: &LevelId) -> LevelStats {
        self.stats.get(id).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LevelId, &LevelStats)> {
        self.stats.iter()
    }

    /// Number of levels with at least one recorded answer.
    pub fn attempted_levels(&self) -> usize {
        self.stats.values().filter(|stats| !stats.is_empty()).count()
    }

    /// Total answers recorded across the curriculum.
    pub fn total_questions(&self) -> u64 {
        self.stats
            .values()
            .map(|stats| u64::from(stats.questions_completed()))
            .sum()
    }

    pub(crate) fn stats_mut(&mut self, id: &LevelId) -> Option<&mut LevelStats> {
        self.stats.get_mut(id)
    }

    pub(crate) fn set_current_level(&mut self, id: Option<LevelId>) {
        self.current_level = id;
    }
}
