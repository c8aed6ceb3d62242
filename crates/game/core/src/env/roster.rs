//! Roster input describing a unit before deployment.

use super::tables::{ArmorId, ClassId, RaceId, SpellId, WeaponId};
use crate::state::{Position, Team, UnitId};
use crate::stats::StatBlock;

/// Everything needed to create a [`crate::UnitActor`].
///
/// References are resolved against a [`super::DefinitionOracle`] at
/// initialization; missing definitions degrade to zero-value defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub id: UnitId,
    pub name: String,
    pub team: Team,
    pub class: ClassId,
    pub race: Option<RaceId>,
    pub level: u32,
    /// Quality variance applied as the instance layer of the bonus chain.
    pub instance: StatBlock,
    pub weapon: Option<WeaponId>,
    pub armor: Option<ArmorId>,
    pub spells: Vec<SpellId>,
    pub spawn: Position,
}

impl UnitSpec {
    pub fn new(id: UnitId, name: impl Into<String>, team: Team, class: ClassId, spawn: Position) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            class,
            race: None,
            level: 1,
            instance: StatBlock::ZERO,
            weapon: None,
            armor: None,
            spells: Vec::new(),
            spawn,
        }
    }

    pub fn with_race(mut self, race: RaceId) -> Self {
        self.race = Some(race);
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn with_instance(mut self, instance: StatBlock) -> Self {
        self.instance = instance;
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponId) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, armor: ArmorId) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn with_spell(mut self, spell: SpellId) -> Self {
        self.spells.push(spell);
        self
    }
}
