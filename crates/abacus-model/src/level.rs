//! Practice levels and their per-learner statistics.

use serde::{Deserialize, Serialize};

use crate::enums::{ComplementTechnique, DigitLevel, Operation};
use crate::error::ModelError;
use crate::ids::LevelId;

/// One cell of the curriculum: an operation drilled with a complement
/// technique at a digit level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub operation: Operation,
    pub complement: ComplementTechnique,
    pub digits: DigitLevel,
}

impl Level {
    pub fn new(operation: Operation, complement: ComplementTechnique, digits: DigitLevel) -> Self {
        Self {
            id: LevelId::from_parts(operation, complement, digits),
            operation,
            complement,
            digits,
        }
    }

    /// True for the first level of an operation's chain.
    pub fn is_entry_point(&self) -> bool {
        self.complement == ComplementTechnique::None && self.digits == DigitLevel::Single
    }

    /// Display title, e.g. `Addition · Small Friend · 2 Digits`.
    pub fn title(&self) -> String {
        format!(
            "{} · {} · {}",
            self.operation.label(),
            self.complement.label(),
            self.digits.label()
        )
    }
}

/// Answer counters for one level.
///
/// Invariant: `correct_answers <= questions_completed`. Counters only grow.
/// Not deserializable on its own; persisted counters go through
/// [`LevelStats::new`] so the invariant is checked on the way in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LevelStats {
    questions_completed: u32,
    correct_answers: u32,
}

impl LevelStats {
    pub fn new(questions_completed: u32, correct_answers: u32) -> Result<Self, ModelError> {
        if correct_answers > questions_completed {
            return Err(ModelError::InvalidStatistics {
                questions_completed,
                correct_answers,
            });
        }
        Ok(Self {
            questions_completed,
            correct_answers,
        })
    }

    #[inline]
    pub fn questions_completed(&self) -> u32 {
        self.questions_completed
    }

    #[inline]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    /// Counters after one more answer, or `None` if a counter would overflow.
    #[must_use]
    pub fn record(&self, was_correct: bool) -> Option<Self> {
        let questions_completed = self.questions_completed.checked_add(1)?;
        let correct_answers = if was_correct {
            self.correct_answers.checked_add(1)?
        } else {
            self.correct_answers
        };
        Some(Self {
            questions_completed,
            correct_answers,
        })
    }

    /// Share of correct answers in `[0, 1]`, `None` before the first answer.
    pub fn accuracy(&self) -> Option<f64> {
        (self.questions_completed > 0)
            .then(|| f64::from(self.correct_answers) / f64::from(self.questions_completed))
    }

    pub fn is_empty(&self) -> bool {
        self.questions_completed == 0
    }
}
