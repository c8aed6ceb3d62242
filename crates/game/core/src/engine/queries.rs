//! Read-only views used by controllers: reach, targets, and snapshots.

use super::{Battle, BattleState, CommandError};
use crate::env::{SpellId, SpellKind};
use crate::state::{Position, UnitActor, UnitId, UnitSnapshot};
use crate::stats::PoolKind;
use crate::targeting::{
    MovementRange, find_unit_targets, has_line_of_sight, movement_range, target_cells,
};

/// Point-in-time view of a battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub state: BattleState,
    pub active: Option<UnitId>,
    pub turn: u32,
    pub units: Vec<UnitSnapshot>,
    pub turn_order: Vec<UnitId>,
}

impl Battle {
    /// Cells the unit can reach with its current MP, start cell included.
    pub fn movement_range(&self, unit: UnitId) -> Result<MovementRange, CommandError> {
        let actor = self.living(unit)?;
        Ok(movement_range(
            &self.grid,
            actor.position(),
            actor.pool(PoolKind::Mp).current(),
        ))
    }

    /// Living hostile units within weapon reach (and sight, when the weapon
    /// needs it), in search order.
    pub fn attackable_targets(&self, unit: UnitId) -> Result<Vec<UnitId>, CommandError> {
        let actor = self.living(unit)?;
        let weapon = actor.weapon();
        Ok(self
            .hostile_targets(actor, weapon.range, weapon.requires_los)
            .into_iter()
            .map(|(id, _)| id)
            .collect())
    }

    /// Whether `attacker` could attack `defender` right now, AP included.
    pub fn can_attack(&self, attacker: UnitId, defender: UnitId) -> bool {
        let Some(actor) = self.units.get(&attacker) else {
            return false;
        };
        if !actor.is_alive() || actor.pool(PoolKind::Ap).current() < self.config.attack_ap_cost {
            return false;
        }
        self.attackable_targets(attacker)
            .is_ok_and(|targets| targets.contains(&defender))
    }

    /// Units a single-target spell may be aimed at. Allies (caster
    /// included) for buffs, enemies otherwise. Area spells return nothing;
    /// use [`Battle::spell_target_cells`].
    pub fn spell_unit_targets(&self, caster: UnitId, spell: SpellId) -> Result<Vec<UnitId>, CommandError> {
        let actor = self.living(caster)?;
        let def = &actor
            .spell(spell)
            .ok_or(CommandError::UnknownSpell { unit: caster, spell })?
            .def;

        if def.kind.targets_cell() {
            return Ok(Vec::new());
        }

        let team = actor.team();
        let allies = def.kind.targets_allies();
        let targets = find_unit_targets(&self.grid, actor.position(), def.range, def.requires_los, |id| {
            self.units
                .get(&id)
                .is_some_and(|unit| unit.is_alive() && unit.team().is_hostile_to(team) != allies)
        });
        Ok(targets.into_iter().map(|(id, _)| id).collect())
    }

    /// Cells a spell may be aimed at, ignoring who stands there.
    pub fn spell_target_cells(&self, caster: UnitId, spell: SpellId) -> Result<Vec<Position>, CommandError> {
        let actor = self.living(caster)?;
        let def = &actor
            .spell(spell)
            .ok_or(CommandError::UnknownSpell { unit: caster, spell })?
            .def;
        Ok(target_cells(&self.grid, actor.position(), def.range, def.requires_los))
    }

    /// Living enemies of `caster` an area spell centered on `center` would hit.
    pub fn area_victims(&self, caster: UnitId, spell: SpellId, center: Position) -> Result<Vec<UnitId>, CommandError> {
        let actor = self.living(caster)?;
        let def = &actor
            .spell(spell)
            .ok_or(CommandError::UnknownSpell { unit: caster, spell })?
            .def;
        let team = actor.team();
        let radius = def.radius();

        Ok(self
            .units
            .values()
            .filter(|unit| {
                unit.is_alive()
                    && unit.team().is_hostile_to(team)
                    && center.manhattan(unit.position()) <= radius
            })
            .map(UnitActor::id)
            .collect())
    }

    /// Known spells that are ready, affordable, and have at least one legal
    /// target. An area spell needs some aimable cell whose blast holds a
    /// living enemy.
    pub fn castable_spells(&self, caster: UnitId) -> Result<Vec<SpellId>, CommandError> {
        let actor = self.living(caster)?;
        let mut castable = Vec::new();

        for known in actor.spells().iter().filter(|known| actor.can_afford(known)) {
            let id = known.id();
            let has_target = match known.def.kind {
                SpellKind::AreaDamage => self
                    .spell_target_cells(caster, id)?
                    .into_iter()
                    .any(|cell| {
                        self.area_victims(caster, id, cell)
                            .is_ok_and(|victims| !victims.is_empty())
                    }),
                SpellKind::SingleDamage | SpellKind::Buff | SpellKind::Debuff => {
                    !self.spell_unit_targets(caster, id)?.is_empty()
                }
            };
            if has_target {
                castable.push(id);
            }
        }
        Ok(castable)
    }

    /// Whether the unit can still do anything this turn: step to another
    /// cell, attack, or cast.
    pub fn has_legal_action(&self, unit: UnitId) -> bool {
        let Some(actor) = self.units.get(&unit) else {
            return false;
        };
        if !actor.is_alive() || !self.state.is_turn() {
            return false;
        }

        let can_move = self
            .movement_range(unit)
            .is_ok_and(|range| range.len() > 1);
        let can_attack = actor.pool(PoolKind::Ap).current() >= self.config.attack_ap_cost
            && self
                .attackable_targets(unit)
                .is_ok_and(|targets| !targets.is_empty());
        let can_cast = self
            .castable_spells(unit)
            .is_ok_and(|spells| !spells.is_empty());

        can_move || can_attack || can_cast
    }

    /// Whether `to` is visible from `from` on the current grid.
    pub fn line_of_sight(&self, from: Position, to: Position) -> bool {
        has_line_of_sight(&self.grid, from, to)
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        let tuning = &self.config.tuning;
        BattleSnapshot {
            state: self.state,
            active: self.active,
            turn: self.turns_started,
            units: self.units.values().map(|unit| unit.snapshot(tuning)).collect(),
            turn_order: self.turn_order.iter().collect(),
        }
    }

    fn living(&self, unit: UnitId) -> Result<&UnitActor, CommandError> {
        let actor = self.lookup(unit)?;
        if !actor.is_alive() {
            return Err(CommandError::UnitDown(unit));
        }
        Ok(actor)
    }

    fn hostile_targets(&self, actor: &UnitActor, range: u32, requires_los: bool) -> Vec<(UnitId, Position)> {
        let team = actor.team();
        find_unit_targets(&self.grid, actor.position(), range, requires_los, |id| {
            self.units
                .get(&id)
                .is_some_and(|unit| unit.is_alive() && unit.team().is_hostile_to(team))
        })
    }
}
