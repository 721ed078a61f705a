//! CLI library components for the abacus trainer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
