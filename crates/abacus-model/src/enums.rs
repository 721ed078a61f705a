//! Type-safe enumerations for the three curriculum axes.
//!
//! Each axis is a closed set. `ALL` lists the members in their fixed order,
//! which is both the display order and (for complements and digit levels)
//! the difficulty order used to chain levels together.
//!
//! # Keys and labels
//!
//! - `as_str()` returns the machine key used inside level identifiers
//!   (`small-friend`, `triple`, ...). Keys never change.
//! - `label()` returns the human label shown by front ends.
//!
//! `FromStr` accepts either form, case-insensitively, with spaces and
//! underscores treated as hyphens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ModelError;

/// Normalize user or file input before matching it against keys.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

/// Arithmetic operation practised by a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Addition,
    Subtraction,
    /// Questions interleave additions and subtractions.
    Mixed,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Mixed => "mixed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operation::Addition => "Addition",
            Operation::Subtraction => "Subtraction",
            Operation::Mixed => "Mixed Operations",
        }
    }

    /// Operator symbol used when rendering questions.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Mixed => "±",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "addition" | "add" | "+" => Ok(Operation::Addition),
            "subtraction" | "sub" | "-" => Ok(Operation::Subtraction),
            "mixed" | "mixed-operations" => Ok(Operation::Mixed),
            _ => Err(ModelError::UnknownOperation(s.to_string())),
        }
    }
}

/// Abacus complement technique drilled by a level.
///
/// Ordered from easiest to hardest:
/// `None < SmallFriend < BigFriend < Family < Mixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplementTechnique {
    /// Direct bead movement, no complement needed.
    None,
    /// Complements to 5 ("small friends").
    SmallFriend,
    /// Complements to 10 ("big friends").
    BigFriend,
    /// Combined 5 and 10 complements in a single move.
    Family,
    /// Interleaves the four techniques above. Harder than any one of them.
    Mixed,
}

impl ComplementTechnique {
    pub const ALL: [ComplementTechnique; 5] = [
        ComplementTechnique::None,
        ComplementTechnique::SmallFriend,
        ComplementTechnique::BigFriend,
        ComplementTechnique::Family,
        ComplementTechnique::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplementTechnique::None => "none",
            ComplementTechnique::SmallFriend => "small-friend",
            ComplementTechnique::BigFriend => "big-friend",
            ComplementTechnique::Family => "family",
            ComplementTechnique::Mixed => "mixed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplementTechnique::None => "No Complement",
            ComplementTechnique::SmallFriend => "Small Friend",
            ComplementTechnique::BigFriend => "Big Friend",
            ComplementTechnique::Family => "Family",
            ComplementTechnique::Mixed => "Mixed Complements",
        }
    }

    /// Zero-based position in the difficulty order.
    pub fn rank(&self) -> usize {
        match self {
            ComplementTechnique::None => 0,
            ComplementTechnique::SmallFriend => 1,
            ComplementTechnique::BigFriend => 2,
            ComplementTechnique::Family => 3,
            ComplementTechnique::Mixed => 4,
        }
    }

    /// The next easier technique, or `None` for the first one.
    pub fn previous(&self) -> Option<ComplementTechnique> {
        match self {
            ComplementTechnique::None => None,
            ComplementTechnique::SmallFriend => Some(ComplementTechnique::None),
            ComplementTechnique::BigFriend => Some(ComplementTechnique::SmallFriend),
            ComplementTechnique::Family => Some(ComplementTechnique::BigFriend),
            ComplementTechnique::Mixed => Some(ComplementTechnique::Family),
        }
    }
}

impl fmt::Display for ComplementTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplementTechnique {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "none" | "no-complement" => Ok(ComplementTechnique::None),
            "small-friend" | "smallfriend" => Ok(ComplementTechnique::SmallFriend),
            "big-friend" | "bigfriend" => Ok(ComplementTechnique::BigFriend),
            "family" => Ok(ComplementTechnique::Family),
            "mixed" | "mixed-complements" => Ok(ComplementTechnique::Mixed),
            _ => Err(ModelError::UnknownComplement(s.to_string())),
        }
    }
}

/// Operand magnitude of a level, from one to five digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigitLevel {
    Single,
    Double,
    Triple,
    Four,
    Five,
}

impl DigitLevel {
    pub const ALL: [DigitLevel; 5] = [
        DigitLevel::Single,
        DigitLevel::Double,
        DigitLevel::Triple,
        DigitLevel::Four,
        DigitLevel::Five,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DigitLevel::Single => "single",
            DigitLevel::Double => "double",
            DigitLevel::Triple => "triple",
            DigitLevel::Four => "four",
            DigitLevel::Five => "five",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DigitLevel::Single => "1 Digit",
            DigitLevel::Double => "2 Digits",
            DigitLevel::Triple => "3 Digits",
            DigitLevel::Four => "4 Digits",
            DigitLevel::Five => "5 Digits",
        }
    }

    /// Number of digits in each operand.
    pub fn digits(&self) -> u32 {
        match self {
            DigitLevel::Single => 1,
            DigitLevel::Double => 2,
            DigitLevel::Triple => 3,
            DigitLevel::Four => 4,
            DigitLevel::Five => 5,
        }
    }

    /// Smallest operand with exactly `digits()` digits (1 for single digits).
    pub fn min_value(&self) -> u32 {
        match self {
            DigitLevel::Single => 1,
            _ => 10u32.pow(self.digits() - 1),
        }
    }

    /// Largest operand with exactly `digits()` digits.
    pub fn max_value(&self) -> u32 {
        10u32.pow(self.digits()) - 1
    }

    /// Closed operand range, e.g. `10..=99` for double digits.
    pub fn range(&self) -> RangeInclusive<u32> {
        self.min_value()..=self.max_value()
    }

    /// The next smaller digit level, or `None` for single digits.
    pub fn previous(&self) -> Option<DigitLevel> {
        match self {
            DigitLevel::Single => None,
            DigitLevel::Double => Some(DigitLevel::Single),
            DigitLevel::Triple => Some(DigitLevel::Double),
            DigitLevel::Four => Some(DigitLevel::Triple),
            DigitLevel::Five => Some(DigitLevel::Four),
        }
    }

    /// The hardest digit level; closes every complement section.
    pub fn last() -> DigitLevel {
        DigitLevel::Five
    }
}

impl fmt::Display for DigitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DigitLevel {
    type Err = ModelError;

    /// Accepts keys (`double`), labels (`2 Digits`) and bare digit counts (`2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "single" | "1" | "1-digit" => Ok(DigitLevel::Single),
            "double" | "2" | "2-digits" => Ok(DigitLevel::Double),
            "triple" | "3" | "3-digits" => Ok(DigitLevel::Triple),
            "four" | "4" | "4-digits" => Ok(DigitLevel::Four),
            "five" | "5" | "5-digits" => Ok(DigitLevel::Five),
            _ => Err(ModelError::UnknownDigitLevel(s.to_string())),
        }
    }
}
