//! Serializable layout of learner progress.
//!
//! Only raw counters and the current-level pointer are persisted. Unlock and
//! completion flags are recomputed after every restore.

use std::collections::BTreeMap;

use abacus_model::{LevelId, LevelStats};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CurriculumConfig;
use crate::error::{ProgressError, Result};
use crate::registry::LevelRegistry;
use crate::snapshot::ProgressSnapshot;
use crate::store::ProgressStore;

/// Persisted counters for one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub questions_completed: u32,
    pub correct_answers: u32,
}

impl From<LevelStats> for LevelCounts {
    fn from(stats: LevelStats) -> Self {
        Self {
            questions_completed: stats.questions_completed(),
            correct_answers: stats.correct_answers(),
        }
    }
}

/// Persisted progress of one learner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub current_level: Option<LevelId>,

    /// Levels without answers may be omitted.
    #[serde(default)]
    pub levels: BTreeMap<LevelId, LevelCounts>,
}

impl ProgressRecord {
    pub fn is_empty(&self) -> bool {
        self.current_level.is_none() && self.levels.is_empty()
    }
}

impl ProgressStore {
    /// Persistable form of the store. Levels without answers are omitted.
    pub fn to_record(&self) -> ProgressRecord {
        let snapshot = self.snapshot();
        ProgressRecord {
            current_level: snapshot.current_level().cloned(),
            levels: snapshot
                .iter()
                .filter(|(_, stats)| !stats.is_empty())
                .map(|(id, stats)| (id.clone(), LevelCounts::from(*stats)))
                .collect(),
        }
    }

    /// Rebuild a store from a persisted record.
    ///
    /// # Errors
    ///
    /// - `UnknownLevel` for any id (counter key or current level) that is not
    ///   registered.
    /// - `InvalidStatistics` when a level has more correct answers than
    ///   questions.
    ///
    /// Nothing is repaired: a record with any such problem is rejected whole.
    pub fn from_record(
        registry: LevelRegistry,
        config: CurriculumConfig,
        record: &ProgressRecord,
    ) -> Result<Self> {
        let mut entries = Vec::with_capacity(record.levels.len());
        for (id, counts) in &record.levels {
            let stats = LevelStats::new(counts.questions_completed, counts.correct_answers)
                .map_err(|_| {
                    warn!(level = %id, "rejected inconsistent saved statistics");
                    ProgressError::InvalidStatistics {
                        id: id.clone(),
                        questions_completed: counts.questions_completed,
                        correct_answers: counts.correct_answers,
                    }
                })?;
            entries.push((id.clone(), stats));
        }
        let snapshot = ProgressSnapshot::from_stats(&registry, entries).inspect_err(|err| {
            warn!(error = %err, "rejected saved progress");
        })?;

        if let Some(current) = &record.current_level {
            registry.resolve(current)?;
        }
        let snapshot = snapshot.with_current_level(record.current_level.clone());
        debug!(
            levels = record.levels.len(),
            current = ?record.current_level,
            "restored progress"
        );
        Ok(Self::from_parts(registry, config, snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abacus_model::Operation;

    #[test]
    fn record_round_trips_through_store() {
        let mut store = ProgressStore::new(LevelRegistry::new(), CurriculumConfig::default());
        let entry = store.registry().entry_point(Operation::Addition).id.clone();
        for answer in [true, true, false] {
            store.record_answer(&entry, answer).unwrap();
        }
        store.set_current_level(&entry).unwrap();

        let record = store.to_record();
        assert_eq!(record.levels.len(), 1);
        assert_eq!(
            record.levels[&entry],
            LevelCounts {
                questions_completed: 3,
                correct_answers: 2
            }
        );

        let restored =
            ProgressStore::from_record(LevelRegistry::new(), CurriculumConfig::default(), &record)
                .unwrap();
        assert_eq!(restored.snapshot(), store.snapshot());
        assert_eq!(restored.unlock_map(), store.unlock_map());
    }

    #[test]
    fn inconsistent_counts_are_rejected() {
        let registry = LevelRegistry::new();
        let entry = registry.entry_point(Operation::Subtraction).id.clone();
        let record = ProgressRecord {
            current_level: None,
            levels: BTreeMap::from([(
                entry.clone(),
                LevelCounts {
                    questions_completed: 2,
                    correct_answers: 5,
                },
            )]),
        };
        let err = ProgressStore::from_record(registry, CurriculumConfig::default(), &record)
            .unwrap_err();
        assert_eq!(
            err,
            ProgressError::InvalidStatistics {
                id: entry,
                questions_completed: 2,
                correct_answers: 5
            }
        );
    }

    #[test]
    fn orphan_ids_are_rejected() {
        let orphan = LevelId::new("division/none/single").unwrap();
        let record = ProgressRecord {
            current_level: None,
            levels: BTreeMap::from([(orphan.clone(), LevelCounts::default())]),
        };
        let err = ProgressStore::from_record(
            LevelRegistry::new(),
            CurriculumConfig::default(),
            &record,
        )
        .unwrap_err();
        assert_eq!(err, ProgressError::UnknownLevel { id: orphan });

        let record = ProgressRecord {
            current_level: Some(LevelId::new("division/none/single").unwrap()),
            levels: BTreeMap::new(),
        };
        assert!(
            ProgressStore::from_record(LevelRegistry::new(), CurriculumConfig::default(), &record)
                .is_err()
        );
    }

    #[test]
    fn record_json_has_no_derived_flags() {
        let mut store = ProgressStore::new(LevelRegistry::new(), CurriculumConfig::default());
        let entry = store.registry().entry_point(Operation::Mixed).id.clone();
        store.record_answer(&entry, true).unwrap();
        let json = serde_json::to_value(store.to_record()).unwrap();
        let counts = &json["levels"]["mixed/none/single"];
        assert_eq!(counts["questions_completed"], 1);
        assert_eq!(counts["correct_answers"], 1);
        assert!(counts.get("unlocked").is_none());
        assert!(counts.get("completed").is_none());
    }
}
