//! Spell targeting shapes and reports.

use super::damage::spell_damage;
use super::effects::EffectApplication;
use crate::config::CombatTuning;
use crate::env::{SpellDef, SpellId};
use crate::state::{Position, UnitActor, UnitId};

/// Where a spell is aimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellTarget {
    Unit(UnitId),
    Cell(Position),
}

/// Per-target result of a cast.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellHit {
    pub unit: UnitId,
    pub damage: u32,
    pub died: bool,
    pub effects: Vec<EffectApplication>,
}

/// Result of a successful cast.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellReport {
    pub caster: UnitId,
    pub spell: SpellId,
    pub target: SpellTarget,
    pub hits: Vec<SpellHit>,
}

impl SpellReport {
    pub fn total_damage(&self) -> u32 {
        self.hits.iter().map(|hit| hit.damage).sum()
    }

    pub fn kills(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.hits.iter().filter(|hit| hit.died).map(|hit| hit.unit)
    }
}

/// Damage a caster's spell deals to each victim.
pub fn caster_spell_damage(caster: &UnitActor, spell: &SpellDef, tuning: &CombatTuning) -> u32 {
    let derived = caster.derived(tuning);
    spell_damage(
        spell.base_power,
        caster.stat_total(spell.scaling),
        derived.spell_power_bonus,
    )
}

/// Whether `position` lies inside the blast centered on `center`.
pub fn in_blast(center: Position, radius: u32, position: Position) -> bool {
    center.manhattan(position) <= radius
}
