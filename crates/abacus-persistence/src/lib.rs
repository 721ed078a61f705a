//! Progress files for the abacus trainer.
//!
//! The engine in `abacus-progress` never touches the disk; this crate is the
//! storage collaborator that writes a learner's [`ProgressRecord`] to a JSON
//! file and reads it back.
//!
//! # File Format
//!
//! ```text
//! {
//!   "format": "abacus-progress",
//!   "schema_version": 1,
//!   "created_at": "2026-01-01T10:00:00+00:00",
//!   "last_saved_at": "2026-01-02T18:30:00+00:00",
//!   "progress": {
//!     "current_level": "addition/none/double",
//!     "levels": {
//!       "addition/none/single": { "questions_completed": 12, "correct_answers": 11 }
//!     }
//!   }
//! }
//! ```
//!
//! Only counters are stored. Unlock and completion state is recomputed by
//! the engine after loading.
//!
//! # Architecture
//!
//! - `types.rs` - the file envelope
//! - `io/` - atomic save and validated load
//! - `error.rs` - error types with user-friendly messages

mod error;
mod io;
mod types;

pub use abacus_progress::ProgressRecord;
pub use error::{PersistenceError, Result};
pub use io::{load_or_new, load_progress, restore_store, save_progress};
pub use types::{CURRENT_SCHEMA_VERSION, FORMAT_TAG, ProgressFile};
