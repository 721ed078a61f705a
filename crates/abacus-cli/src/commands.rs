use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use abacus_model::{LevelId, LevelStats, Operation};
use abacus_persistence::{
    PersistenceError, ProgressFile, load_or_new, restore_store, save_progress,
};
use abacus_progress::{
    CurriculumConfig, LevelRegistry, LevelView, ProgressStore, prerequisite_of,
};

use crate::cli::{NextArgs, RecordArgs, SelectArgs};

/// A loaded progress file together with the engine built from it.
pub struct Session {
    store: ProgressStore,
    file: ProgressFile,
    path: PathBuf,
}

impl Session {
    /// Load configuration and progress. A missing progress file starts a new
    /// learner; a missing config file is an error.
    pub fn open(progress_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => CurriculumConfig::load(path)
                .with_context(|| format!("load config {}", path.display()))?,
            None => CurriculumConfig::default(),
        };
        let file = load_or_new(progress_path).map_err(persistence_error)?;
        let store =
            restore_store(&file, LevelRegistry::new(), config).map_err(persistence_error)?;
        debug!(
            path = %progress_path.display(),
            attempted = store.snapshot().attempted_levels(),
            "opened progress"
        );
        Ok(Self {
            store,
            file,
            path: progress_path.to_path_buf(),
        })
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store back to the progress file.
    pub fn save(&mut self) -> Result<()> {
        self.file.progress = self.store.to_record();
        save_progress(&mut self.file, &self.path).map_err(persistence_error)
    }
}

/// Keep the friendly message on top and the full error underneath.
fn persistence_error(error: PersistenceError) -> anyhow::Error {
    let message = match error.suggestion() {
        Some(hint) => format!("{} {hint}", error.user_message()),
        None => error.user_message(),
    };
    anyhow::Error::new(error).context(message)
}

fn parse_level(store: &ProgressStore, value: &str) -> Result<LevelId> {
    let id = LevelId::parse(value).with_context(|| format!("invalid level id '{value}'"))?;
    store
        .registry()
        .resolve(&id)
        .map_err(|error| anyhow::anyhow!(error.user_message()))?;
    Ok(id)
}

pub fn run_levels(session: &Session, operation: Option<Operation>) -> Vec<LevelView> {
    session
        .store
        .level_views()
        .into_iter()
        .filter(|view| operation.is_none_or(|op| view.operation == op))
        .collect()
}

/// What `record` did to a level.
#[derive(Debug, Clone)]
pub struct RecordReport {
    pub level: LevelId,
    pub title: String,
    pub recorded: u32,
    pub stats: LevelStats,
    pub completed: bool,
    pub newly_completed: bool,
    pub newly_unlocked: Vec<LevelId>,
    /// Correct answers still needed for mastery, if reachable.
    pub answers_remaining: Option<u32>,
}

pub fn run_record(session: &mut Session, args: &RecordArgs) -> Result<RecordReport> {
    let level = parse_level(&session.store, &args.level)?;
    let span = info_span!("record", level = %level, count = args.count);
    let _guard = span.enter();

    let was_correct = args.was_correct();
    let mut stats = session.store.stats(&level)?;
    let mut completed = false;
    let mut newly_completed = false;
    let mut newly_unlocked = Vec::new();
    for _ in 0..args.count {
        let outcome = session.store.record_answer(&level, was_correct)?;
        stats = outcome.stats;
        completed = outcome.completed;
        newly_completed |= outcome.newly_completed;
        newly_unlocked.extend(outcome.newly_unlocked);
    }
    session.save()?;

    let answers_remaining = if completed {
        None
    } else {
        session.store.config().mastery.answers_remaining(&stats)
    };
    let title = session
        .store
        .registry()
        .resolve(&level)?
        .title();
    info!(
        questions = stats.questions_completed(),
        correct = stats.correct_answers(),
        "recorded answers"
    );
    Ok(RecordReport {
        level,
        title,
        recorded: args.count,
        stats,
        completed,
        newly_completed: newly_completed && completed,
        newly_unlocked,
        answers_remaining,
    })
}

/// Result of `select`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected {
        level: LevelId,
        title: String,
    },
    /// The level is locked; `prerequisite` is what must be mastered first.
    Locked {
        level: LevelId,
        title: String,
        prerequisite: Option<LevelId>,
    },
}

pub fn run_select(session: &mut Session, args: &SelectArgs) -> Result<SelectOutcome> {
    let level_id = parse_level(&session.store, &args.level)?;
    let level = session.store.registry().resolve(&level_id)?.clone();
    match session.store.set_current_level(&level_id) {
        Ok(()) => {
            session.save()?;
            Ok(SelectOutcome::Selected {
                level: level_id,
                title: level.title(),
            })
        }
        Err(error) if error.is_locked() => Ok(SelectOutcome::Locked {
            level: level_id,
            title: level.title(),
            prerequisite: prerequisite_of(&level),
        }),
        Err(error) => Err(error.into()),
    }
}

/// Recommendation for one operation; `level` is `None` once every level
/// of the operation is mastered.
#[derive(Debug, Clone)]
pub struct NextLevel {
    pub operation: Operation,
    pub level: Option<LevelView>,
}

pub fn run_next(session: &Session, args: &NextArgs) -> Vec<NextLevel> {
    let operations: Vec<Operation> = match args.operation {
        Some(op) => vec![op.into()],
        None => Operation::ALL.to_vec(),
    };
    let views = session.store.level_views();
    operations
        .into_iter()
        .map(|operation| {
            let level = session
                .store
                .recommended_level(operation)
                .and_then(|level| views.iter().find(|view| view.id == level.id).cloned());
            NextLevel { operation, level }
        })
        .collect()
}
