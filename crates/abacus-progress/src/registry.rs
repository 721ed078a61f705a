//! The fixed set of practice levels and the prerequisite chain between them.

use std::collections::HashMap;

use abacus_model::{ComplementTechnique, DigitLevel, Level, LevelId, Operation};

use crate::config::UnlockPolicy;
use crate::error::{ProgressError, Result};

/// Build every level of the curriculum.
///
/// Order is Operation outer, ComplementTechnique middle, DigitLevel inner.
/// Within an operation this is also the unlock order.
pub fn build_levels() -> Vec<Level> {
    Operation::ALL
        .iter()
        .flat_map(|&operation| {
            ComplementTechnique::ALL.iter().flat_map(move |&complement| {
                DigitLevel::ALL
                    .iter()
                    .map(move |&digits| Level::new(operation, complement, digits))
            })
        })
        .collect()
}

/// Level preceding `level` in its operation's chain.
///
/// The chain walks digit levels within a complement section, then moves to
/// the single-digit level of the next harder complement. The entry point
/// (`None` complement, single digits) has no prerequisite.
pub fn prerequisite_of(level: &Level) -> Option<LevelId> {
    if let Some(digits) = level.digits.previous() {
        return Some(LevelId::from_parts(level.operation, level.complement, digits));
    }
    level
        .complement
        .previous()
        .map(|complement| LevelId::from_parts(level.operation, complement, DigitLevel::last()))
}

/// Extra cross-operation prerequisites imposed by `policy`.
///
/// With mixed gating on, the mixed-operation entry point also needs the last
/// level of the addition and subtraction chains.
pub fn gate_prerequisites(level: &Level, policy: &UnlockPolicy) -> Vec<LevelId> {
    if !policy.gate_mixed_operation || level.operation != Operation::Mixed || !level.is_entry_point()
    {
        return Vec::new();
    }
    [Operation::Addition, Operation::Subtraction]
        .into_iter()
        .map(final_level_id)
        .collect()
}

/// Last level of an operation's chain.
pub fn final_level_id(operation: Operation) -> LevelId {
    LevelId::from_parts(operation, ComplementTechnique::Mixed, DigitLevel::last())
}

/// Ordered, immutable collection of all levels.
#[derive(Debug, Clone)]
pub struct LevelRegistry {
    levels: Vec<Level>,
    index: HashMap<LevelId, usize>,
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelRegistry {
    pub fn new() -> Self {
        let levels = build_levels();
        let index = levels
            .iter()
            .enumerate()
            .map(|(position, level)| (level.id.clone(), position))
            .collect();
        Self { levels, index }
    }

    /// All levels in registry order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn contains(&self, id: &LevelId) -> bool {
        self.index.contains_key(id)
    }

    pub fn index_of(&self, id: &LevelId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &LevelId) -> Option<&Level> {
        self.index_of(id).map(|position| &self.levels[position])
    }

    /// Look up a level, failing with `UnknownLevel` for foreign ids.
    pub fn resolve(&self, id: &LevelId) -> Result<&Level> {
        self.get(id)
            .ok_or_else(|| ProgressError::UnknownLevel { id: id.clone() })
    }

    /// Levels of one (operation, complement) section, in digit order.
    pub fn section(
        &self,
        operation: Operation,
        complement: ComplementTechnique,
    ) -> impl Iterator<Item = &Level> + '_ {
        self.levels
            .iter()
            .filter(move |level| level.operation == operation && level.complement == complement)
    }

    /// Levels of one operation, in chain order.
    pub fn operation_levels(&self, operation: Operation) -> impl Iterator<Item = &Level> + '_ {
        self.levels
            .iter()
            .filter(move |level| level.operation == operation)
    }

    /// First level of an operation's chain.
    pub fn entry_point(&self, operation: Operation) -> &Level {
        let id = LevelId::from_parts(operation, ComplementTechnique::None, DigitLevel::Single);
        // Every axis triple is registered at construction.
        &self.levels[self.index[&id]]
    }

    /// Levels whose chain prerequisite is `id`.
    pub fn dependents_of<'a>(&'a self, id: &'a LevelId) -> impl Iterator<Item = &'a Level> + 'a {
        self.levels
            .iter()
            .filter(move |level| prerequisite_of(level).as_ref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(op: Operation, complement: ComplementTechnique, digits: DigitLevel) -> LevelId {
        LevelId::from_parts(op, complement, digits)
    }

    #[test]
    fn registry_holds_full_cross_product() {
        let registry = LevelRegistry::new();
        assert_eq!(registry.len(), 3 * 5 * 5);
        assert_eq!(
            registry.levels()[0].id,
            id(Operation::Addition, ComplementTechnique::None, DigitLevel::Single)
        );
        assert_eq!(
            registry.levels()[1].id,
            id(Operation::Addition, ComplementTechnique::None, DigitLevel::Double)
        );
        assert_eq!(
            registry.levels()[5].id,
            id(Operation::Addition, ComplementTechnique::SmallFriend, DigitLevel::Single)
        );
        assert_eq!(
            registry.levels()[74].id,
            id(Operation::Mixed, ComplementTechnique::Mixed, DigitLevel::Five)
        );
    }

    #[test]
    fn build_order_is_stable() {
        assert_eq!(build_levels(), build_levels());
    }

    #[test]
    fn prerequisite_walks_digits_then_complements() {
        let registry = LevelRegistry::new();
        let level = |op, complement, digits| registry.get(&id(op, complement, digits)).unwrap();

        assert_eq!(
            prerequisite_of(level(
                Operation::Addition,
                ComplementTechnique::None,
                DigitLevel::Single
            )),
            None
        );
        assert_eq!(
            prerequisite_of(level(
                Operation::Addition,
                ComplementTechnique::BigFriend,
                DigitLevel::Triple
            )),
            Some(id(
                Operation::Addition,
                ComplementTechnique::BigFriend,
                DigitLevel::Double
            ))
        );
        assert_eq!(
            prerequisite_of(level(
                Operation::Subtraction,
                ComplementTechnique::Family,
                DigitLevel::Single
            )),
            Some(id(
                Operation::Subtraction,
                ComplementTechnique::BigFriend,
                DigitLevel::Five
            ))
        );
    }

    #[test]
    fn chain_prerequisite_is_previous_level_in_registry_order() {
        let registry = LevelRegistry::new();
        for op in Operation::ALL {
            let chain: Vec<&Level> = registry.operation_levels(op).collect();
            assert_eq!(chain.len(), 25);
            assert_eq!(prerequisite_of(chain[0]), None);
            for pair in chain.windows(2) {
                assert_eq!(prerequisite_of(pair[1]), Some(pair[0].id.clone()));
            }
        }
    }

    #[test]
    fn gate_prerequisites_only_apply_to_mixed_entry_when_enabled() {
        let registry = LevelRegistry::new();
        let mixed_entry = registry.entry_point(Operation::Mixed);
        let off = UnlockPolicy::default();
        let on = UnlockPolicy {
            gate_mixed_operation: true,
        };

        assert!(gate_prerequisites(mixed_entry, &off).is_empty());
        assert_eq!(
            gate_prerequisites(mixed_entry, &on),
            vec![
                final_level_id(Operation::Addition),
                final_level_id(Operation::Subtraction)
            ]
        );
        assert!(gate_prerequisites(registry.entry_point(Operation::Addition), &on).is_empty());
        let second = registry
            .get(&id(Operation::Mixed, ComplementTechnique::None, DigitLevel::Double))
            .unwrap();
        assert!(gate_prerequisites(second, &on).is_empty());
    }

    #[test]
    fn resolve_rejects_foreign_ids() {
        let registry = LevelRegistry::new();
        let foreign = LevelId::new("multiplication/none/single").unwrap();
        assert_eq!(
            registry.resolve(&foreign),
            Err(ProgressError::UnknownLevel { id: foreign.clone() })
        );
    }

    #[test]
    fn sections_have_one_level_per_digit_level() {
        let registry = LevelRegistry::new();
        for op in Operation::ALL {
            for complement in ComplementTechnique::ALL {
                let digits: Vec<DigitLevel> =
                    registry.section(op, complement).map(|l| l.digits).collect();
                assert_eq!(digits, DigitLevel::ALL.to_vec());
            }
        }
    }

    #[test]
    fn dependents_follow_the_chain() {
        let registry = LevelRegistry::new();
        let five = id(Operation::Addition, ComplementTechnique::None, DigitLevel::Five);
        let dependents: Vec<&LevelId> = registry.dependents_of(&five).map(|l| &l.id).collect();
        assert_eq!(
            dependents,
            vec![&id(
                Operation::Addition,
                ComplementTechnique::SmallFriend,
                DigitLevel::Single
            )]
        );
    }
}
