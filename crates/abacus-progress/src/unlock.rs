//! Unlock decisions derived from completion of prerequisite levels.
//!
//! Nothing here is stored: every answer is a pure function of the registry,
//! a snapshot and the policy.

use std::collections::BTreeMap;

use abacus_model::{LevelId, LevelStats};

use crate::config::{CurriculumConfig, MasteryPolicy};
use crate::registry::{LevelRegistry, gate_prerequisites, prerequisite_of};
use crate::snapshot::ProgressSnapshot;

/// Whether `stats` meet the mastery threshold.
pub fn is_completed(stats: &LevelStats, mastery: &MasteryPolicy) -> bool {
    mastery.is_mastered(stats)
}

/// Compute the unlock status of every registered level.
///
/// A level is unlocked when its chain prerequisite (if any) and every gate
/// prerequisite are completed. A level that is itself completed is always
/// unlocked.
pub fn compute_unlocked(
    registry: &LevelRegistry,
    snapshot: &ProgressSnapshot,
    config: &CurriculumConfig,
) -> UnlockMap {
    let completed = |id: &LevelId| {
        snapshot
            .stats(id)
            .is_some_and(|stats| is_completed(stats, &config.mastery))
    };

    let unlocked = registry
        .levels()
        .iter()
        .map(|level| {
            let chain_ready =
                prerequisite_of(level).is_none_or(|prerequisite| completed(&prerequisite));
            let gates_ready = gate_prerequisites(level, &config.unlock)
                .iter()
                .all(&completed);
            let state = completed(&level.id) || (chain_ready && gates_ready);
            (level.id.clone(), state)
        })
        .collect();

    UnlockMap { unlocked }
}

/// Unlock status per level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockMap {
    unlocked: BTreeMap<LevelId, bool>,
}

impl UnlockMap {
    /// Unlock status of `id`; `false` for ids outside the registry.
    pub fn is_unlocked(&self, id: &LevelId) -> bool {
        self.unlocked.get(id).copied().unwrap_or(false)
    }

    pub fn get(&self, id: &LevelId) -> Option<bool> {
        self.unlocked.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.values().filter(|&&state| state).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LevelId, bool)> {
        self.unlocked.iter().map(|(id, &state)| (id, state))
    }

    /// Levels unlocked here that were locked in `previous`.
    pub fn newly_unlocked(&self, previous: &UnlockMap) -> Vec<LevelId> {
        self.iter()
            .filter(|&(id, state)| state && !previous.is_unlocked(id))
            .map(|(id, _)| id.clone())
            .collect()
    }
}
