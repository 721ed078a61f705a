use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid level id: {0:?}")]
    InvalidLevelId(String),
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("unknown complement technique: {0}")]
    UnknownComplement(String),
    #[error("unknown digit level: {0}")]
    UnknownDigitLevel(String),
    #[error(
        "invalid statistics: {correct_answers} correct answers out of {questions_completed} questions"
    )]
    InvalidStatistics {
        questions_completed: u32,
        correct_answers: u32,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
