//! Curriculum model for abacus mental-arithmetic practice.
//!
//! The curriculum has three axes: the [`Operation`] being drilled, the
//! [`ComplementTechnique`] used for carrying and borrowing, and the
//! [`DigitLevel`] that sets operand magnitude. Every combination of the three
//! is a [`Level`], addressed by a stable [`LevelId`].

#![deny(unsafe_code)]

pub mod enums;
pub mod error;
pub mod ids;
pub mod level;

pub use enums::{ComplementTechnique, DigitLevel, Operation};
pub use error::{ModelError, Result};
pub use ids::LevelId;
pub use level::{Level, LevelStats};
