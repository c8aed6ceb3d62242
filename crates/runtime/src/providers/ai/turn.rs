//! One AI unit's turn as an explicit phase machine.
//!
//! [`AiTurn::resume`] runs synchronously until the turn needs to wait, then
//! hands back a [`Suspend`] describing what to wait for. The caller performs
//! the wait (timer, animation) and resumes. Nothing borrowed from the battle
//! survives a suspension, so the driver can hold the battle mutably between
//! steps.
//!
//! ```text
//! Deciding ─┬─ cast/attack ─→ AwaitingDelay → Executing → AwaitingDelay → Deciding
//!           ├─ move ────────→ Executing → AwaitingMovement → Deciding (moved)
//!           └─ end turn ────→ Finished
//! ```
//!
//! A successful attack or cast goes back to deciding, so a unit keeps acting
//! while it has AP for it. A rejected attack or cast finishes the turn.

use std::time::Duration;

use tactics_core::{Battle, Position, UnitId};
use tracing::{debug, warn};

use super::context::AiDecision;
use super::policy::decide;

/// Where a turn currently stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    Deciding { moved: bool },
    /// Waiting out a pacing delay before entering `then`.
    AwaitingDelay { then: Box<TurnPhase> },
    Executing { decision: AiDecision, moved: bool },
    /// Waiting for the relocation along `path` to finish animating.
    AwaitingMovement { path: Vec<Position> },
    Finished,
}

/// What the driver must wait for before resuming.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Suspend {
    Delay(Duration),
    Movement { unit: UnitId, path: Vec<Position> },
}

#[derive(Debug)]
pub struct AiTurn {
    unit: UnitId,
    phase: TurnPhase,
    step_delay: Duration,
}

impl AiTurn {
    pub fn new(unit: UnitId, step_delay: Duration) -> Self {
        Self {
            unit,
            phase: TurnPhase::Deciding { moved: false },
            step_delay,
        }
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TurnPhase::Finished
    }

    /// Advances until the next suspension point. `None` means the turn is
    /// over and the caller should end it.
    pub fn resume(&mut self, battle: &mut Battle) -> Option<Suspend> {
        loop {
            let phase = std::mem::replace(&mut self.phase, TurnPhase::Finished);
            match phase {
                TurnPhase::Deciding { moved } => {
                    if battle.state().is_terminal() || battle.active_unit() != Some(self.unit) {
                        return None;
                    }
                    let decision = decide(battle, self.unit, moved);
                    debug!(target: "tactics::ai", unit = %self.unit, moved, ?decision, "decided");
                    match decision {
                        AiDecision::EndTurn => return None,
                        AiDecision::Move { .. } => {
                            self.phase = TurnPhase::Executing { decision, moved };
                        }
                        AiDecision::Attack { .. } | AiDecision::CastSpell { .. } => {
                            return self.pause(TurnPhase::Executing { decision, moved });
                        }
                    }
                }
                TurnPhase::AwaitingDelay { then } => {
                    self.phase = *then;
                }
                TurnPhase::Executing { decision, moved } => {
                    let is_move = matches!(decision, AiDecision::Move { .. });
                    match self.execute(battle, decision) {
                        Executed::Moved(path) => {
                            let suspend = Suspend::Movement {
                                unit: self.unit,
                                path: path.clone(),
                            };
                            self.phase = TurnPhase::AwaitingMovement { path };
                            return Some(suspend);
                        }
                        Executed::Acted => return self.pause(TurnPhase::Deciding { moved }),
                        // A rejected move still spends the unit's chance to move.
                        Executed::Rejected if is_move => {
                            self.phase = TurnPhase::Deciding { moved: true };
                        }
                        Executed::Rejected => return self.pause(TurnPhase::Finished),
                    }
                }
                TurnPhase::AwaitingMovement { .. } => {
                    self.phase = TurnPhase::Deciding { moved: true };
                }
                TurnPhase::Finished => return None,
            }
        }
    }

    fn pause(&mut self, then: TurnPhase) -> Option<Suspend> {
        self.phase = TurnPhase::AwaitingDelay {
            then: Box::new(then),
        };
        Some(Suspend::Delay(self.step_delay))
    }

    /// Issues `decision` against the battle.
    fn execute(&mut self, battle: &mut Battle, decision: AiDecision) -> Executed {
        let unit = self.unit;
        match decision {
            AiDecision::Move { destination } => match battle.try_move(unit, destination) {
                Ok(outcome) => Executed::Moved(outcome.path),
                Err(error) => {
                    warn!(target: "tactics::ai", %unit, %destination, %error, "move rejected");
                    Executed::Rejected
                }
            },
            AiDecision::Attack { target } => match battle.try_attack(unit, target) {
                Ok(report) => {
                    debug!(target: "tactics::ai", %unit, %target, outcome = ?report.outcome, damage = report.damage, "attacked");
                    Executed::Acted
                }
                Err(error) => {
                    warn!(target: "tactics::ai", %unit, %target, %error, "attack rejected");
                    Executed::Rejected
                }
            },
            AiDecision::CastSpell { spell, target } => match battle.try_cast_spell(unit, spell, target) {
                Ok(report) => {
                    debug!(target: "tactics::ai", %unit, %spell, hits = report.hits.len(), "spell cast");
                    Executed::Acted
                }
                Err(error) => {
                    warn!(target: "tactics::ai", %unit, %spell, %error, "cast rejected");
                    Executed::Rejected
                }
            },
            AiDecision::EndTurn => Executed::Rejected,
        }
    }
}

enum Executed {
    Moved(Vec<Position>),
    Acted,
    Rejected,
}
