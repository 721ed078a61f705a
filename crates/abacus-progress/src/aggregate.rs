//! Completion counts at level, section, operation and curriculum scope.
//!
//! [`ProgressSummary`] borrows the inputs and computes on demand; it holds no
//! counts of its own, so it cannot drift from the statistics it describes.

use abacus_model::{ComplementTechnique, DigitLevel, Level, LevelId, Operation};
use serde::Serialize;

use crate::config::CurriculumConfig;
use crate::registry::LevelRegistry;
use crate::snapshot::ProgressSnapshot;
use crate::unlock::{UnlockMap, is_completed};

/// State of a single level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub completed: bool,
    pub unlocked: bool,
}

/// Completed levels out of a group of levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionProgress {
    pub completed: usize,
    pub total: usize,
}

impl SectionProgress {
    /// Completed share in `[0, 1]`; zero for an empty group.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl std::ops::Add for SectionProgress {
    type Output = SectionProgress;

    fn add(self, other: SectionProgress) -> SectionProgress {
        SectionProgress {
            completed: self.completed + other.completed,
            total: self.total + other.total,
        }
    }
}

/// One row of the level list shown to a learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelView {
    pub id: LevelId,
    pub operation: Operation,
    pub complement: ComplementTechnique,
    pub digits: DigitLevel,
    pub title: String,
    pub questions_completed: u32,
    pub correct_answers: u32,
    pub accuracy: Option<f64>,
    pub unlocked: bool,
    pub completed: bool,
    pub current: bool,
}

/// Derived progress figures over one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ProgressSummary<'a> {
    registry: &'a LevelRegistry,
    snapshot: &'a ProgressSnapshot,
    unlocked: &'a UnlockMap,
    config: &'a CurriculumConfig,
}

impl<'a> ProgressSummary<'a> {
    pub fn new(
        registry: &'a LevelRegistry,
        snapshot: &'a ProgressSnapshot,
        unlocked: &'a UnlockMap,
        config: &'a CurriculumConfig,
    ) -> Self {
        Self {
            registry,
            snapshot,
            unlocked,
            config,
        }
    }

    fn completed(&self, level: &Level) -> bool {
        self.snapshot
            .stats(&level.id)
            .is_some_and(|stats| is_completed(stats, &self.config.mastery))
    }

    fn count<'b>(&self, levels: impl Iterator<Item = &'b Level>) -> SectionProgress {
        levels.fold(SectionProgress::default(), |acc, level| SectionProgress {
            completed: acc.completed + usize::from(self.completed(level)),
            total: acc.total + 1,
        })
    }

    /// Completion and unlock state of one level; `None` for foreign ids.
    pub fn level_progress(&self, id: &LevelId) -> Option<LevelProgress> {
        let level = self.registry.get(id)?;
        Some(LevelProgress {
            completed: self.completed(level),
            unlocked: self.unlocked.is_unlocked(id),
        })
    }

    /// Completed levels of one complement section of an operation.
    pub fn section_progress(
        &self,
        operation: Operation,
        complement: ComplementTechnique,
    ) -> SectionProgress {
        self.count(self.registry.section(operation, complement))
    }

    /// Every section of `operation`, in complement order.
    pub fn sections(&self, operation: Operation) -> Vec<(ComplementTechnique, SectionProgress)> {
        ComplementTechnique::ALL
            .iter()
            .map(|&complement| (complement, self.section_progress(operation, complement)))
            .collect()
    }

    /// Completed levels across all complements of `operation`.
    pub fn operation_progress(&self, operation: Operation) -> SectionProgress {
        self.count(self.registry.operation_levels(operation))
    }

    /// Completed levels across the whole curriculum.
    pub fn overall_progress(&self) -> SectionProgress {
        self.count(self.registry.levels().iter())
    }

    pub fn completed_count(&self) -> usize {
        self.overall_progress().completed
    }

    pub fn total_levels(&self) -> usize {
        self.registry.len()
    }

    /// Share of completed levels in `[0, 100]`, unrounded.
    pub fn overall_percentage(&self) -> f64 {
        self.overall_progress().fraction() * 100.0
    }

    /// One row per level, in registry order.
    pub fn level_views(&self) -> Vec<LevelView> {
        let current = self.snapshot.current_level();
        self.registry
            .levels()
            .iter()
            .map(|level| {
                let stats = self.snapshot.stats_or_default(&level.id);
                LevelView {
                    id: level.id.clone(),
                    operation: level.operation,
                    complement: level.complement,
                    digits: level.digits,
                    title: level.title(),
                    questions_completed: stats.questions_completed(),
                    correct_answers: stats.correct_answers(),
                    accuracy: stats.accuracy(),
                    unlocked: self.unlocked.is_unlocked(&level.id),
                    completed: self.completed(level),
                    current: current == Some(&level.id),
                }
            })
            .collect()
    }
}
