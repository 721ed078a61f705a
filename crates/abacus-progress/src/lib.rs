//! Level progression and unlocking for the abacus curriculum.
//!
//! # Architecture
//!
//! - `registry` - the 75 levels and the prerequisite chain between them
//! - `store` - [`ProgressStore`], the only place learner progress changes
//! - `unlock` - pure unlock decisions over a [`ProgressSnapshot`]
//! - `aggregate` - completion counts for progress displays
//! - `config` - mastery threshold and unlock rules
//! - `record` - persisted layout of learner progress
//! - `shared` - lock-protected store handle for multi-threaded hosts
//!
//! # Example
//!
//! ```
//! use abacus_model::Operation;
//! use abacus_progress::{CurriculumConfig, LevelRegistry, ProgressStore};
//!
//! let mut store = ProgressStore::new(LevelRegistry::new(), CurriculumConfig::default());
//! let entry = store.registry().entry_point(Operation::Addition).id.clone();
//! for _ in 0..10 {
//!     store.record_answer(&entry, true)?;
//! }
//! assert!(store.is_completed(&entry)?);
//! assert_eq!(store.summary().operation_progress(Operation::Addition).completed, 1);
//! # Ok::<(), abacus_progress::ProgressError>(())
//! ```

#![deny(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod record;
pub mod registry;
pub mod shared;
pub mod snapshot;
pub mod store;
pub mod unlock;

pub use aggregate::{LevelProgress, LevelView, ProgressSummary, SectionProgress};
pub use config::{
    CurriculumConfig, DEFAULT_MASTERY_RATIO, DEFAULT_MIN_ATTEMPTS, MasteryPolicy, UnlockPolicy,
};
pub use error::{ConfigError, ProgressError, Result};
pub use record::{LevelCounts, ProgressRecord};
pub use registry::{LevelRegistry, build_levels, gate_prerequisites, prerequisite_of};
pub use shared::SharedProgressStore;
pub use snapshot::ProgressSnapshot;
pub use store::{AnswerOutcome, ProgressStore};
pub use unlock::{UnlockMap, compute_unlocked, is_completed};
