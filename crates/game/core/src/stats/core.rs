//! Primary attributes shared by every unit.
//!
//! The five attributes (STR, DEX, INT, DEF, SPD) are the only stats that flow
//! through the bonus chain. Everything else (accuracy, dodge, pool maxima) is
//! derived from their totals.

use core::ops::{Add, AddAssign};

/// Individual attribute, used by spell scaling and stat buffs/debuffs.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    Strength,
    Dexterity,
    Intelligence,
    Defense,
    Speed,
}

/// Flat values for each attribute.
///
/// Used both for stored layers (class base, race modifier) and for computed
/// totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub defense: i32,
    pub speed: i32,
}

impl StatBlock {
    pub const ZERO: Self = Self {
        strength: 0,
        dexterity: 0,
        intelligence: 0,
        defense: 0,
        speed: 0,
    };

    pub const fn new(strength: i32, dexterity: i32, intelligence: i32, defense: i32, speed: i32) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
            defense,
            speed,
        }
    }

    /// Block with a single attribute set.
    pub fn single(kind: StatKind, value: i32) -> Self {
        let mut block = Self::ZERO;
        block.adjust(kind, value);
        block
    }

    pub const fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Dexterity => self.dexterity,
            StatKind::Intelligence => self.intelligence,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn adjust(&mut self, kind: StatKind, value: i32) {
        let slot = match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Dexterity => &mut self.dexterity,
            StatKind::Intelligence => &mut self.intelligence,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
        };
        *slot += value;
    }

    /// Multiplies every attribute by `factor` (used for per-level growth).
    pub const fn scaled(self, factor: i32) -> Self {
        Self {
            strength: self.strength * factor,
            dexterity: self.dexterity * factor,
            intelligence: self.intelligence * factor,
            defense: self.defense * factor,
            speed: self.speed * factor,
        }
    }
}

impl Add for StatBlock {
    type Output = StatBlock;

    fn add(mut self, rhs: StatBlock) -> StatBlock {
        self += rhs;
        self
    }
}

impl AddAssign for StatBlock {
    fn add_assign(&mut self, rhs: StatBlock) {
        self.strength += rhs.strength;
        self.dexterity += rhs.dexterity;
        self.intelligence += rhs.intelligence;
        self.defense += rhs.defense;
        self.speed += rhs.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn single_sets_only_requested_kind() {
        for kind in StatKind::iter() {
            let block = StatBlock::single(kind, 7);
            for other in StatKind::iter() {
                let expected = if other == kind { 7 } else { 0 };
                assert_eq!(block.get(other), expected, "{kind} / {other}");
            }
        }
    }

    #[test]
    fn blocks_add_componentwise() {
        let a = StatBlock::new(1, 2, 3, 4, 5);
        let b = StatBlock::new(10, 20, 30, 40, 50).scaled(2);
        assert_eq!(a + b, StatBlock::new(21, 42, 63, 84, 105));
    }

    #[test]
    fn adjust_accumulates_on_one_attribute() {
        let mut block = StatBlock::new(5, 5, 5, 5, 5);
        block.adjust(StatKind::Defense, 3);
        block.adjust(StatKind::Defense, -7);
        assert_eq!(block, StatBlock::new(5, 5, 5, 1, 5));
    }
}
