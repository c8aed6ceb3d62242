//! Setup, deployment, and turn progression.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::{
    Battle, BattleEvent, BattleOutcome, BattleState, CommandError, CommandKind, TurnAdvance,
};
use crate::env::UnitSpec;
use crate::state::{EffectKind, InitiativeRoll, Position, Team, TurnOrder, UnitActor, UnitId};

impl Battle {
    /// Creates units from the roster and places them at their spawn cells.
    ///
    /// `Setup → Deployment`. Fails without mutation on an empty roster,
    /// duplicate ids, or an invalid spawn cell.
    pub fn initialize(&mut self, roster: Vec<UnitSpec>) -> Result<(), CommandError> {
        self.require_phase(CommandKind::Initialize, |state| state == BattleState::Setup)?;
        if roster.is_empty() {
            return Err(CommandError::EmptyRoster);
        }

        let mut units = BTreeMap::new();
        for spec in &roster {
            let unit = UnitActor::from_spec(spec, self.tables.as_ref(), &self.config.tuning);
            if units.insert(spec.id, unit).is_some() {
                return Err(CommandError::DuplicateUnit(spec.id));
            }
        }

        let mut placed: Vec<Position> = Vec::with_capacity(roster.len());
        for spec in &roster {
            if let Err(error) = self.grid.set_occupant(spec.spawn, spec.id) {
                for position in placed {
                    self.grid.clear_occupant(position);
                }
                return Err(error.into());
            }
            placed.push(spec.spawn);
        }

        self.units = units;
        for spec in &roster {
            self.emit(BattleEvent::UnitDeployed {
                unit: spec.id,
                position: spec.spawn,
            });
        }
        info!(target: "tactics::engine", units = self.units.len(), "battle initialized");
        self.set_state(BattleState::Deployment);
        Ok(())
    }

    /// Moves a player unit to another free cell during deployment.
    pub fn deploy(&mut self, unit: UnitId, position: Position) -> Result<(), CommandError> {
        self.require_phase(CommandKind::Deploy, |state| state == BattleState::Deployment)?;
        let actor = self.lookup(unit)?;
        if actor.team() != Team::Player {
            return Err(CommandError::NotDeployable(unit));
        }

        let from = actor.position();
        if from != position {
            self.grid.relocate(unit, from, position)?;
        }
        if let Some(actor) = self.units.get_mut(&unit) {
            actor.set_position(position);
        }

        debug!(target: "tactics::engine", %unit, %from, to = %position, "unit deployed");
        self.emit(BattleEvent::UnitDeployed { unit, position });
        Ok(())
    }

    /// Completes deployment: builds the turn order and starts the first turn.
    ///
    /// Initiative is `SPD + DEX / 2`; ties are broken by an independent random
    /// draw. The order is computed once and never re-sorted.
    pub fn start_battle(&mut self) -> Result<TurnAdvance, CommandError> {
        self.require_phase(CommandKind::StartBattle, |state| {
            state == BattleState::Deployment
        })?;

        let tuning = &self.config.tuning;
        let mut rolls = Vec::with_capacity(self.units.len());
        for unit in self.units.values().filter(|unit| unit.is_alive()) {
            rolls.push(InitiativeRoll {
                unit: unit.id(),
                initiative: unit.derived(tuning).initiative,
                tie_break: self.rng.next_u32(),
            });
        }
        self.turn_order = TurnOrder::from_rolls(rolls);
        info!(
            target: "tactics::engine",
            order = ?self.turn_order.iter().collect::<Vec<_>>(),
            "turn order computed"
        );

        if let Some(outcome) = self.check_outcome() {
            return Ok(TurnAdvance::Finished(outcome));
        }

        let Some(first) = self.turn_order.current() else {
            return Err(CommandError::EmptyRoster);
        };
        self.begin_turn(first);
        Ok(self.settle_turn(false))
    }

    /// Ends the active unit's turn and starts the next living unit's turn.
    ///
    /// Dead units are swept from the turn order, the order advances (wrapping
    /// completes a cycle and ticks effect durations), and victory is checked.
    /// In a terminal state this reports the outcome again.
    pub fn end_turn(&mut self) -> Result<TurnAdvance, CommandError> {
        if let Some(outcome) = self.outcome() {
            return Ok(TurnAdvance::Finished(outcome));
        }
        self.require_phase(CommandKind::EndTurn, BattleState::is_turn)?;

        if let Some(unit) = self.active.take() {
            debug!(target: "tactics::engine", %unit, "turn ended");
            self.emit(BattleEvent::TurnEnded { unit });
        }
        self.move_ledger.clear();
        self.committed = false;

        let dead: Vec<UnitId> = self
            .turn_order
            .iter()
            .filter(|id| !self.units.get(id).is_some_and(UnitActor::is_alive))
            .collect();
        for unit in dead {
            self.turn_order.remove(unit);
        }

        if let Some(outcome) = self.check_outcome() {
            return Ok(TurnAdvance::Finished(outcome));
        }
        Ok(self.settle_turn(true))
    }

    /// Advances until the active unit survives its turn-start effects.
    ///
    /// When `advance_first` is false the current unit's turn has already
    /// been started.
    fn settle_turn(&mut self, mut advance_first: bool) -> TurnAdvance {
        loop {
            if let Some(outcome) = self.outcome() {
                return TurnAdvance::Finished(outcome);
            }

            if advance_first {
                let Some((next, wrapped)) = self.turn_order.advance() else {
                    // Living units are always in the order, so an empty order
                    // means nobody is left standing.
                    let outcome = self.check_outcome().unwrap_or(BattleOutcome::Defeat);
                    return TurnAdvance::Finished(outcome);
                };
                if wrapped {
                    self.complete_cycle();
                }
                self.begin_turn(next);
            }
            advance_first = true;

            let living = self
                .active
                .and_then(|unit| self.units.get(&unit))
                .filter(|actor| actor.is_alive())
                .map(|actor| (actor.id(), actor.team()));
            if let Some((unit, team)) = living {
                return TurnAdvance::Next { unit, team };
            }
        }
    }

    /// Decrements every effect by one cycle and emits expirations.
    fn complete_cycle(&mut self) {
        self.cycles_completed += 1;
        let tuning = self.config.tuning.clone();
        let mut expired_events = Vec::new();

        for unit in self.units.values_mut().filter(|unit| unit.is_alive()) {
            let expired = unit.effects_mut().tick();
            if !expired.is_empty() {
                unit.refresh_maxima(&tuning);
            }
            for effect in expired {
                expired_events.push(BattleEvent::EffectExpired {
                    unit: unit.id(),
                    kind: effect.kind,
                });
            }
        }

        debug!(
            target: "tactics::engine",
            cycle = self.cycles_completed,
            expired = expired_events.len(),
            "turn cycle completed"
        );
        self.events.extend(expired_events);
    }

    /// Starts `unit`'s turn: cooldowns tick, heal/damage-over-time resolve,
    /// and MP/AP reset (to zero when stunned).
    fn begin_turn(&mut self, unit: UnitId) {
        self.move_ledger.clear();
        self.committed = false;
        self.active = Some(unit);

        let tuning = self.config.tuning.clone();
        let Some(actor) = self.units.get_mut(&unit) else {
            return;
        };
        let team = actor.team();
        actor.tick_cooldowns();
        actor.reset_turn_resources(&tuning);

        let heal = actor
            .effects()
            .get(EffectKind::HealOverTime)
            .map(|effect| effect.magnitude.max(0) as u32);
        let dot = actor
            .effects()
            .get(EffectKind::DamageOverTime)
            .map(|effect| effect.magnitude.max(0) as u32);

        let healed = heal.map(|amount| actor.heal(amount));
        let damage = dot.map(|amount| (actor.take_damage(amount), actor.hp()));

        self.turns_started += 1;
        self.set_state(BattleState::for_team(team));
        debug!(target: "tactics::engine", %unit, %team, turn = self.turns_started, "turn started");
        self.emit(BattleEvent::TurnStarted {
            unit,
            team,
            turn: self.turns_started,
        });

        if let Some(amount) = healed.filter(|amount| *amount > 0) {
            self.emit(BattleEvent::Healed { unit, amount });
        }
        if let Some((taken, remaining_hp)) = damage {
            self.emit(BattleEvent::DamageApplied {
                source: None,
                target: unit,
                amount: taken.applied,
                critical: false,
                missed: false,
                remaining_hp,
            });
            if taken.died {
                self.handle_death(unit);
            }
        }
    }
}
