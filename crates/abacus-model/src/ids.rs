use std::fmt;

use crate::ModelError;
use crate::enums::{ComplementTechnique, DigitLevel, Operation};

const SEPARATOR: char = '/';

/// Stable identifier of a practice level.
///
/// The canonical form joins the three axis keys with `/`, for example
/// `subtraction/big-friend/triple`. It is derived from the axes alone, so it
/// survives across sessions and can be rebuilt without a registry.
///
/// Any non-blank string is accepted by [`LevelId::new`] so that identifiers
/// arriving from outside (saved files, front ends) can be carried around and
/// rejected by the registry rather than at parse time.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct LevelId(String);

impl LevelId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidLevelId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Canonical identifier for an axis triple.
    pub fn from_parts(
        operation: Operation,
        complement: ComplementTechnique,
        digits: DigitLevel,
    ) -> Self {
        Self(format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            operation.as_str(),
            complement.as_str(),
            digits.as_str()
        ))
    }

    /// Parse an identifier and require it to be canonical.
    ///
    /// Loose spellings are normalized: `Addition/Small Friend/2` becomes
    /// `addition/small-friend/double`.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let mut pieces = value.trim().split(SEPARATOR);
        let (Some(op), Some(complement), Some(digits), None) =
            (pieces.next(), pieces.next(), pieces.next(), pieces.next())
        else {
            return Err(ModelError::InvalidLevelId(value.to_string()));
        };
        Ok(Self::from_parts(
            op.parse()?,
            complement.parse()?,
            digits.parse()?,
        ))
    }

    /// Decode the axis triple. Returns `None` for non-canonical identifiers.
    pub fn parts(&self) -> Option<(Operation, ComplementTechnique, DigitLevel)> {
        let mut pieces = self.0.split(SEPARATOR);
        let op = pieces.next()?;
        let complement = pieces.next()?;
        let digits = pieces.next()?;
        if pieces.next().is_some() {
            return None;
        }
        let parts = (
            op.parse().ok()?,
            complement.parse().ok()?,
            digits.parse().ok()?,
        );
        // Only exact keys count as canonical.
        (Self::from_parts(parts.0, parts.1, parts.2) == *self).then_some(parts)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LevelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_joins_keys() {
        let id = LevelId::from_parts(
            Operation::Subtraction,
            ComplementTechnique::BigFriend,
            DigitLevel::Triple,
        );
        assert_eq!(id.as_str(), "subtraction/big-friend/triple");
        assert_eq!(
            id.parts(),
            Some((
                Operation::Subtraction,
                ComplementTechnique::BigFriend,
                DigitLevel::Triple
            ))
        );
    }

    #[test]
    fn parse_normalizes_loose_spelling() {
        let id = LevelId::parse("Addition/Small Friend/2").unwrap();
        assert_eq!(id.as_str(), "addition/small-friend/double");
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        assert!(LevelId::parse("addition/none").is_err());
        assert!(LevelId::parse("addition/none/single/extra").is_err());
        assert_eq!(
            LevelId::parse("addition/none/six"),
            Err(ModelError::UnknownDigitLevel("six".to_string()))
        );
    }

    #[test]
    fn new_keeps_foreign_ids_but_not_blank_ones() {
        let foreign = LevelId::new(" addition/none/huge ").unwrap();
        assert_eq!(foreign.as_str(), "addition/none/huge");
        assert_eq!(foreign.parts(), None);
        assert!(LevelId::new("   ").is_err());
    }

    #[test]
    fn loose_spelling_is_not_canonical() {
        let loose = LevelId::new("Addition/none/single").unwrap();
        assert_eq!(loose.parts(), None);
    }

    #[test]
    fn all_triples_are_distinct() {
        let mut seen = std::collections::BTreeSet::new();
        for op in Operation::ALL {
            for complement in ComplementTechnique::ALL {
                for digits in DigitLevel::ALL {
                    assert!(seen.insert(LevelId::from_parts(op, complement, digits)));
                }
            }
        }
        assert_eq!(seen.len(), 75);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = LevelId::from_parts(Operation::Mixed, ComplementTechnique::Family, DigitLevel::Five);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"mixed/family/five\"");
        let back: LevelId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
