//! Serialized access to one progress store from several threads.
//!
//! Every mutation runs under the lock and every read takes an owned
//! snapshot under the same lock, so a recorded answer is fully applied
//! before any later reader can observe the store.

use std::sync::{Arc, Mutex, MutexGuard};

use abacus_model::LevelId;

use crate::error::{ProgressError, Result};
use crate::record::ProgressRecord;
use crate::snapshot::ProgressSnapshot;
use crate::store::{AnswerOutcome, ProgressStore};
use crate::unlock::UnlockMap;

/// Cloneable handle to a single, lock-protected [`ProgressStore`].
#[derive(Debug, Clone)]
pub struct SharedProgressStore {
    inner: Arc<Mutex<ProgressStore>>,
}

impl SharedProgressStore {
    pub fn new(store: ProgressStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ProgressStore>> {
        self.inner.lock().map_err(|_| ProgressError::Poisoned)
    }

    pub fn record_answer(&self, level_id: &LevelId, was_correct: bool) -> Result<AnswerOutcome> {
        self.lock()?.record_answer(level_id, was_correct)
    }

    pub fn set_current_level(&self, level_id: &LevelId) -> Result<()> {
        self.lock()?.set_current_level(level_id)
    }

    pub fn snapshot(&self) -> Result<ProgressSnapshot> {
        Ok(self.lock()?.snapshot())
    }

    /// Snapshot and unlock map taken together under one lock.
    pub fn read(&self) -> Result<(ProgressSnapshot, UnlockMap)> {
        let store = self.lock()?;
        Ok((store.snapshot(), store.unlock_map().clone()))
    }

    pub fn to_record(&self) -> Result<ProgressRecord> {
        Ok(self.lock()?.to_record())
    }

    /// Run `f` with exclusive access to the store.
    pub fn with_store<T>(&self, f: impl FnOnce(&mut ProgressStore) -> T) -> Result<T> {
        let mut store = self.lock()?;
        Ok(f(&mut store))
    }
}
