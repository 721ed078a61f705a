//! File I/O for progress persistence.
//!
//! This module handles:
//! - Saving progress with atomic writes
//! - Loading progress with format validation
//! - Rebuilding an engine store from a loaded file

mod load;
mod save;

pub use load::{load_or_new, load_progress, restore_store};
pub use save::save_progress;
