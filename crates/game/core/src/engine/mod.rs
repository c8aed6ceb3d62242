//! Battle state machine.
//!
//! [`Battle`] is the authoritative owner of the grid, the unit registry, and
//! the turn order. Every mutation flows through its command methods, which
//! are gated on the battle phase and on the active unit, return
//! `Result<_, CommandError>`, and leave state untouched on failure.
//!
//! ```text
//! Setup ──initialize──▶ Deployment ──start_battle──▶ PlayerTurn ⇄ EnemyTurn
//!                                                         │
//!                                                         ▼
//!                                                  Victory | Defeat
//! ```

mod builder;
mod commands;
mod errors;
mod events;
mod queries;
mod turns;

pub use builder::BattleBuilder;
pub use commands::{AttackReport, MoveOutcome};
pub use errors::{CommandError, CommandKind, InitError};
pub use events::{BattleEvent, EventCategory};
pub use queries::BattleSnapshot;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::BattleConfig;
use crate::env::{DefinitionOracle, RngSource};
use crate::state::{GridModel, Position, Team, TurnOrder, UnitActor, UnitId};

/// Battle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleState {
    Setup,
    Deployment,
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

impl BattleState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, BattleState::Victory | BattleState::Defeat)
    }

    pub const fn is_turn(self) -> bool {
        matches!(self, BattleState::PlayerTurn | BattleState::EnemyTurn)
    }

    pub const fn for_team(team: Team) -> Self {
        match team {
            Team::Player => BattleState::PlayerTurn,
            Team::Enemy => BattleState::EnemyTurn,
        }
    }
}

/// Final result of a battle, seen from the player's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl BattleOutcome {
    pub const fn state(self) -> BattleState {
        match self {
            BattleOutcome::Victory => BattleState::Victory,
            BattleOutcome::Defeat => BattleState::Defeat,
        }
    }
}

/// Result of [`Battle::end_turn`] and [`Battle::start_battle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnAdvance {
    Next { unit: UnitId, team: Team },
    Finished(BattleOutcome),
}

/// Move recorded for undo within the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MoveRecord {
    from: Position,
    to: Position,
    cost: u32,
}

/// Authoritative battle context.
pub struct Battle {
    config: BattleConfig,
    grid: GridModel,
    tables: Box<dyn DefinitionOracle>,
    rng: Box<dyn RngSource>,
    units: BTreeMap<UnitId, UnitActor>,
    turn_order: TurnOrder,
    state: BattleState,
    active: Option<UnitId>,
    turns_started: u32,
    cycles_completed: u32,
    move_ledger: Vec<MoveRecord>,
    committed: bool,
    events: Vec<BattleEvent>,
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("state", &self.state)
            .field("active", &self.active)
            .field("units", &self.units.len())
            .field("turns_started", &self.turns_started)
            .finish_non_exhaustive()
    }
}

impl Battle {
    pub fn builder() -> BattleBuilder {
        BattleBuilder::new()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn tables(&self) -> &dyn DefinitionOracle {
        self.tables.as_ref()
    }

    /// The unit whose turn it is.
    pub fn active_unit(&self) -> Option<UnitId> {
        self.active
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitActor> {
        self.units.get(&id)
    }

    /// All units in id order, dead ones included.
    pub fn units(&self) -> impl Iterator<Item = &UnitActor> {
        self.units.values()
    }

    pub fn living_units(&self, team: Team) -> impl Iterator<Item = &UnitActor> {
        self.units
            .values()
            .filter(move |unit| unit.is_alive() && unit.team() == team)
    }

    pub fn turn_order(&self) -> &TurnOrder {
        &self.turn_order
    }

    pub fn turns_started(&self) -> u32 {
        self.turns_started
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state {
            BattleState::Victory => Some(BattleOutcome::Victory),
            BattleState::Defeat => Some(BattleOutcome::Defeat),
            _ => None,
        }
    }

    /// Takes every buffered event, oldest first.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Internal helpers shared by commands and turn flow
    // ========================================================================

    fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    fn set_state(&mut self, to: BattleState) {
        let from = self.state;
        if from == to {
            return;
        }
        debug!(target: "tactics::engine", %from, %to, "battle state changed");
        self.state = to;
        self.emit(BattleEvent::StateChanged { from, to });
    }

    fn require_phase(
        &self,
        command: CommandKind,
        allowed: impl Fn(BattleState) -> bool,
    ) -> Result<(), CommandError> {
        if allowed(self.state) {
            Ok(())
        } else {
            Err(CommandError::InvalidPhase {
                command,
                state: self.state,
            })
        }
    }

    /// Gate for turn commands: the battle is in a turn phase and `unit` is the
    /// active, living unit.
    fn require_active(&self, command: CommandKind, unit: UnitId) -> Result<&UnitActor, CommandError> {
        self.require_phase(command, BattleState::is_turn)?;
        let actor = self.units.get(&unit).ok_or(CommandError::UnknownUnit(unit))?;
        if self.active != Some(unit) {
            return Err(CommandError::NotYourTurn {
                unit,
                active: self.active,
            });
        }
        if !actor.is_alive() {
            return Err(CommandError::UnitDown(unit));
        }
        Ok(actor)
    }

    fn lookup(&self, unit: UnitId) -> Result<&UnitActor, CommandError> {
        self.units.get(&unit).ok_or(CommandError::UnknownUnit(unit))
    }

    /// Removes a freshly killed unit from the grid and turn order, then checks
    /// whether the battle is decided.
    fn handle_death(&mut self, unit: UnitId) {
        let Some(actor) = self.units.get(&unit) else {
            return;
        };
        let (position, team) = (actor.position(), actor.team());

        if self.grid.occupant_at(position) == Some(unit) {
            self.grid.clear_occupant(position);
        }
        self.turn_order.remove(unit);
        if self.active == Some(unit) {
            self.move_ledger.clear();
        }

        debug!(target: "tactics::engine", %unit, %team, %position, "unit died");
        self.emit(BattleEvent::UnitDied { unit, team });
        self.check_outcome();
    }

    /// Defeat when no player unit lives (takes priority), victory when no
    /// enemy lives. Transitions and emits the result once.
    fn check_outcome(&mut self) -> Option<BattleOutcome> {
        if self.state.is_terminal() {
            return self.outcome();
        }

        let players_alive = self.living_units(Team::Player).next().is_some();
        let enemies_alive = self.living_units(Team::Enemy).next().is_some();

        let outcome = if !players_alive {
            BattleOutcome::Defeat
        } else if !enemies_alive {
            BattleOutcome::Victory
        } else {
            return None;
        };

        self.finish(outcome);
        Some(outcome)
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        self.active = None;
        self.move_ledger.clear();
        self.set_state(outcome.state());

        let tuning = &self.config.tuning;
        let survivors = self
            .units
            .values()
            .filter(|unit| unit.is_alive())
            .map(|unit| unit.snapshot(tuning))
            .collect();
        debug!(target: "tactics::engine", %outcome, "battle finished");
        self.emit(BattleEvent::BattleResult { outcome, survivors });
    }
}
