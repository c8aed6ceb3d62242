//! Unit commands: move, undo, attack, cast.

use tracing::debug;

use super::{Battle, BattleEvent, CommandError, CommandKind, MoveRecord};
use crate::combat::{
    AttackOutcome, EffectApplication, SpellHit, SpellReport, SpellTarget, apply_effect,
    caster_spell_damage, in_blast, resolve_attack,
};
use crate::env::{EffectPayload, SpellDef, SpellId, SpellKind};
use crate::state::{Position, UnitId};
use crate::stats::PoolKind;
use crate::targeting::{has_line_of_sight, movement_range};

/// Result of a successful [`Battle::try_move`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub unit: UnitId,
    pub from: Position,
    pub to: Position,
    /// Cells entered, in order, ending at `to`.
    pub path: Vec<Position>,
    pub mp_spent: u32,
    pub mp_remaining: u32,
}

/// Result of [`Battle::try_attack`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub outcome: AttackOutcome,
    pub hit_chance: f32,
    pub damage: u32,
    pub defender_hp: u32,
    pub defender_died: bool,
}

impl Battle {
    /// Moves the active unit along the shortest path to `destination`.
    ///
    /// Each step releases the cell being left and claims the next one. MP is
    /// charged per step. The move is recorded so it can be undone until the
    /// unit attacks or casts.
    pub fn try_move(&mut self, unit: UnitId, destination: Position) -> Result<MoveOutcome, CommandError> {
        let actor = self.require_active(CommandKind::Move, unit)?;
        let from = actor.position();
        let mp = actor.pool(PoolKind::Mp).current();

        let path = movement_range(&self.grid, from, mp)
            .path_to(destination)
            .filter(|path| !path.is_empty())
            .ok_or(CommandError::Unreachable { unit, destination })?;
        let cost = path.len() as u32;

        self.grid.walk(unit, from, &path)?;

        let Some(actor) = self.units.get_mut(&unit) else {
            return Err(CommandError::UnknownUnit(unit));
        };
        actor.try_spend(PoolKind::Mp, cost);
        actor.set_position(destination);
        let mp_remaining = actor.pool(PoolKind::Mp).current();

        self.move_ledger.push(MoveRecord {
            from,
            to: destination,
            cost,
        });
        debug!(target: "tactics::engine", %unit, %from, to = %destination, cost, "unit moved");
        self.emit(BattleEvent::UnitMoved {
            unit,
            from,
            to: destination,
            path: path.clone(),
            mp_spent: cost,
        });

        Ok(MoveOutcome {
            unit,
            from,
            to: destination,
            path,
            mp_spent: cost,
            mp_remaining,
        })
    }

    /// Reverts the last move of the active unit and refunds its exact MP.
    ///
    /// Only allowed while the unit has not attacked or cast this turn.
    pub fn undo_move(&mut self, unit: UnitId) -> Result<Position, CommandError> {
        self.require_active(CommandKind::UndoMove, unit)?;
        if self.committed {
            return Err(CommandError::UndoLocked(unit));
        }
        let record = *self
            .move_ledger
            .last()
            .ok_or(CommandError::NothingToUndo(unit))?;

        self.grid.relocate(unit, record.to, record.from)?;
        self.move_ledger.pop();
        if let Some(actor) = self.units.get_mut(&unit) {
            actor.set_position(record.from);
            actor.restore(PoolKind::Mp, record.cost);
        }

        debug!(target: "tactics::engine", %unit, to = %record.from, refunded = record.cost, "move undone");
        self.emit(BattleEvent::MoveUndone {
            unit,
            from: record.to,
            to: record.from,
            mp_refunded: record.cost,
        });
        Ok(record.from)
    }

    /// Basic weapon attack from the active unit.
    ///
    /// Attacking a unit that is already down is a no-op reported as
    /// [`AttackOutcome::TargetDown`]; no AP is spent.
    pub fn try_attack(&mut self, attacker: UnitId, defender: UnitId) -> Result<AttackReport, CommandError> {
        let actor = self.require_active(CommandKind::Attack, attacker)?;
        let target = self.lookup(defender)?;

        if !target.is_alive() {
            return Ok(AttackReport {
                attacker,
                defender,
                outcome: AttackOutcome::TargetDown,
                hit_chance: 0.0,
                damage: 0,
                defender_hp: 0,
                defender_died: false,
            });
        }
        if !actor.team().is_hostile_to(target.team()) {
            return Err(CommandError::InvalidTarget {
                unit: attacker,
                target: defender,
            });
        }

        let origin = actor.position();
        let target_position = target.position();
        let weapon = actor.weapon();
        if origin.manhattan(target_position) > weapon.range || !self.grid.is_valid(target_position) {
            return Err(CommandError::OutOfRange {
                unit: attacker,
                target: target_position,
            });
        }
        if weapon.requires_los && !has_line_of_sight(&self.grid, origin, target_position) {
            return Err(CommandError::NoLineOfSight {
                unit: attacker,
                target: target_position,
            });
        }

        let cost = self.config.attack_ap_cost;
        let available = actor.pool(PoolKind::Ap).current();
        if available < cost {
            return Err(CommandError::InsufficientResources {
                unit: attacker,
                pool: PoolKind::Ap,
                needed: cost,
                available,
            });
        }

        let tuning = &self.config.tuning;
        let attacker_stats = actor.derived(tuning);
        let defender_stats = target.derived(tuning);
        let resolution = resolve_attack(&attacker_stats, &defender_stats, self.rng.as_mut(), tuning);

        if let Some(actor) = self.units.get_mut(&attacker) {
            actor.try_spend(PoolKind::Ap, cost);
        }
        self.commit_action();

        let (applied, died, remaining_hp) = match self.units.get_mut(&defender) {
            Some(target) if resolution.outcome.landed() => {
                let taken = target.take_damage(resolution.damage);
                (taken.applied, taken.died, target.hp())
            }
            Some(target) => (0, false, target.hp()),
            None => (0, false, 0),
        };

        debug!(
            target: "tactics::engine",
            %attacker,
            %defender,
            outcome = %resolution.outcome,
            damage = applied,
            remaining_hp,
            "attack resolved"
        );
        self.emit(BattleEvent::DamageApplied {
            source: Some(attacker),
            target: defender,
            amount: applied,
            critical: resolution.outcome == AttackOutcome::Critical,
            missed: resolution.outcome == AttackOutcome::Miss,
            remaining_hp,
        });
        if died {
            self.handle_death(defender);
        }

        Ok(AttackReport {
            attacker,
            defender,
            outcome: resolution.outcome,
            hit_chance: resolution.hit_chance,
            damage: applied,
            defender_hp: remaining_hp,
            defender_died: died,
        })
    }

    /// Casts a known spell from the active unit.
    ///
    /// Area spells take a cell (a unit target is read as its cell); all other
    /// kinds take a unit (a cell target is read as its occupant). Casting on a
    /// unit that is already down is a no-op with no hits and no cost.
    pub fn try_cast_spell(
        &mut self,
        caster: UnitId,
        spell: SpellId,
        target: SpellTarget,
    ) -> Result<SpellReport, CommandError> {
        let actor = self.require_active(CommandKind::CastSpell, caster)?;
        let known = actor
            .spell(spell)
            .ok_or(CommandError::UnknownSpell { unit: caster, spell })?;
        if !known.is_ready() {
            return Err(CommandError::SpellOnCooldown {
                spell,
                remaining: known.cooldown,
            });
        }
        let def = known.def.clone();
        for (pool, needed) in [(PoolKind::Ap, def.ap_cost), (PoolKind::SpellSlots, def.slot_cost)] {
            let available = actor.pool(pool).current();
            if available < needed {
                return Err(CommandError::InsufficientResources {
                    unit: caster,
                    pool,
                    needed,
                    available,
                });
            }
        }

        let origin = actor.position();
        let caster_team = actor.team();

        let (aim, target) = match (def.kind.targets_cell(), target) {
            (true, SpellTarget::Cell(position)) => (position, SpellTarget::Cell(position)),
            (true, SpellTarget::Unit(id)) => {
                let position = self.lookup(id)?.position();
                (position, SpellTarget::Cell(position))
            }
            (false, SpellTarget::Unit(id)) => (self.lookup(id)?.position(), SpellTarget::Unit(id)),
            (false, SpellTarget::Cell(position)) => {
                let id = self
                    .grid
                    .occupant_at(position)
                    .ok_or(CommandError::NoTargetAt { position })?;
                (position, SpellTarget::Unit(id))
            }
        };

        if let SpellTarget::Unit(id) = target {
            let victim = self.lookup(id)?;
            if !victim.is_alive() {
                return Ok(SpellReport {
                    caster,
                    spell,
                    target,
                    hits: Vec::new(),
                });
            }
            let hostile = caster_team.is_hostile_to(victim.team());
            if hostile == def.kind.targets_allies() {
                return Err(CommandError::InvalidTarget {
                    unit: caster,
                    target: id,
                });
            }
        }

        if !self.grid.is_valid(aim) || origin.manhattan(aim) > def.range {
            return Err(CommandError::OutOfRange {
                unit: caster,
                target: aim,
            });
        }
        if def.requires_los && !has_line_of_sight(&self.grid, origin, aim) {
            return Err(CommandError::NoLineOfSight {
                unit: caster,
                target: aim,
            });
        }

        // Validation done; from here on the cast commits.
        let damage = caster_spell_damage(actor, &def, &self.config.tuning);
        if let Some(actor) = self.units.get_mut(&caster) {
            actor.try_spend(PoolKind::Ap, def.ap_cost);
            actor.try_spend(PoolKind::SpellSlots, def.slot_cost);
            actor.start_cooldown(spell);
        }
        self.commit_action();

        debug!(target: "tactics::engine", %caster, %spell, kind = %def.kind, %aim, "spell cast");
        self.emit(BattleEvent::SpellCast {
            caster,
            spell,
            target,
        });

        let victims: Vec<UnitId> = match target {
            SpellTarget::Unit(id) => vec![id],
            SpellTarget::Cell(center) => self
                .units
                .values()
                .filter(|unit| {
                    unit.is_alive()
                        && unit.team().is_hostile_to(caster_team)
                        && in_blast(center, def.radius(), unit.position())
                })
                .map(|unit| unit.id())
                .collect(),
        };

        let deals_damage = matches!(def.kind, SpellKind::SingleDamage | SpellKind::AreaDamage);
        let mut hits = Vec::with_capacity(victims.len());
        for victim in victims {
            hits.push(self.resolve_spell_hit(caster, victim, &def, deals_damage.then_some(damage)));
        }

        Ok(SpellReport {
            caster,
            spell,
            target,
            hits,
        })
    }

    fn resolve_spell_hit(
        &mut self,
        caster: UnitId,
        victim: UnitId,
        def: &SpellDef,
        damage: Option<u32>,
    ) -> SpellHit {
        let mut hit = SpellHit {
            unit: victim,
            damage: 0,
            died: false,
            effects: Vec::new(),
        };

        if let Some(amount) = damage {
            let Some(target) = self.units.get_mut(&victim) else {
                return hit;
            };
            let taken = target.take_damage(amount);
            let remaining_hp = target.hp();
            hit.damage = taken.applied;
            hit.died = taken.died;
            self.emit(BattleEvent::DamageApplied {
                source: Some(caster),
                target: victim,
                amount: taken.applied,
                critical: false,
                missed: false,
                remaining_hp,
            });
            if taken.died {
                self.handle_death(victim);
                return hit;
            }
        }

        let payloads: Vec<EffectPayload> = def.primary.iter().chain(def.secondary.iter()).copied().collect();
        for payload in payloads {
            let application = match self.units.get_mut(&victim) {
                Some(target) => apply_effect(target, payload, &self.config.tuning),
                None => continue,
            };
            self.record_effect(victim, payload, application);
            hit.effects.push(application);
        }
        hit
    }

    fn record_effect(&mut self, unit: UnitId, payload: EffectPayload, application: EffectApplication) {
        let event = match application {
            EffectApplication::Applied(effect) => BattleEvent::EffectApplied {
                unit,
                effect,
                refreshed: false,
            },
            EffectApplication::Refreshed(effect) => BattleEvent::EffectApplied {
                unit,
                effect,
                refreshed: true,
            },
            EffectApplication::Healed(amount) => BattleEvent::Healed { unit, amount },
            EffectApplication::Rejected(reason) => BattleEvent::EffectRejected {
                unit,
                kind: payload.kind,
                reason,
            },
        };
        self.emit(event);
    }

    /// An attack or cast locks in the turn's movement.
    fn commit_action(&mut self) {
        self.committed = true;
        self.move_ledger.clear();
    }
}
