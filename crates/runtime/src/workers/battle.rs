//! Battle worker that owns the authoritative [`tactics_core::Battle`].
//!
//! Receives commands from [`crate::BattleHandle`], runs them against the
//! engine, publishes the resulting events, and drives AI-controlled turns.
//! All turns run on this one task, so no two units ever act concurrently.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, info, warn};

use tactics_core::{
    AttackReport, Battle, BattleSnapshot, Controller, MoveOutcome, MovementRange, Position,
    SpellId, SpellReport, SpellTarget, TurnAdvance, UnitActor, UnitId, UnitSnapshot,
};

use crate::api::{MovementAnimator, Result, RuntimeError};
use crate::config::PacingConfig;
use crate::events::{ControlEvent, Event, EventBus, TargetingEvent};
use crate::providers::ai::{AiTurn, Suspend};

/// Commands that can be sent to the battle worker
pub enum Command {
    Deploy {
        unit: UnitId,
        position: Position,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Leaves deployment and starts the first turn.
    StartBattle {
        reply: oneshot::Sender<Result<TurnAdvance>>,
    },
    /// Ends the active unit's turn.
    EndTurn {
        reply: oneshot::Sender<Result<TurnAdvance>>,
    },
    Move {
        unit: UnitId,
        destination: Position,
        reply: oneshot::Sender<Result<MoveOutcome>>,
    },
    UndoMove {
        unit: UnitId,
        reply: oneshot::Sender<Result<Position>>,
    },
    Attack {
        attacker: UnitId,
        defender: UnitId,
        reply: oneshot::Sender<Result<AttackReport>>,
    },
    CastSpell {
        caster: UnitId,
        spell: SpellId,
        target: SpellTarget,
        reply: oneshot::Sender<Result<SpellReport>>,
    },
    MovementRange {
        unit: UnitId,
        reply: oneshot::Sender<Result<MovementRange>>,
    },
    AttackableTargets {
        unit: UnitId,
        reply: oneshot::Sender<Result<Vec<UnitId>>>,
    },
    /// Query the current battle (read-only snapshot)
    Snapshot { reply: oneshot::Sender<BattleSnapshot> },
}

/// A human turn scheduled to end on its own.
#[derive(Clone, Copy, Debug)]
struct PendingEnd {
    unit: UnitId,
    turn: u32,
    deadline: Instant,
}

/// Background task that processes battle commands.
pub struct BattleWorker {
    battle: Battle,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    animator: Arc<dyn MovementAnimator>,
    pacing: PacingConfig,
    pending_end: Option<PendingEnd>,
}

impl BattleWorker {
    pub fn new(
        battle: Battle,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        animator: Arc<dyn MovementAnimator>,
        pacing: PacingConfig,
    ) -> Self {
        info!(
            target: "tactics::runtime",
            state = %battle.state(),
            units = battle.units().count(),
            "BattleWorker initialized"
        );

        Self {
            battle,
            command_rx,
            event_bus,
            animator,
            pacing,
            pending_end: None,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            let deadline = self.pending_end.map(|pending| pending.deadline);
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.auto_end_turn().await;
                }
                else => break,
            }
        }
        debug!(target: "tactics::runtime", "battle worker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Deploy {
                unit,
                position,
                reply,
            } => {
                let result = self.battle.deploy(unit, position).map_err(RuntimeError::from);
                self.flush_events();
                if reply.send(result).is_err() {
                    debug!("Deploy reply channel closed (caller dropped)");
                }
            }
            Command::StartBattle { reply } => {
                let result = self.battle.start_battle().map_err(RuntimeError::from);
                self.flush_events();
                let started = result.is_ok();
                if reply.send(result).is_err() {
                    debug!("StartBattle reply channel closed (caller dropped)");
                }
                if started {
                    self.drive_ai().await;
                }
            }
            Command::EndTurn { reply } => {
                let result = self.battle.end_turn().map_err(RuntimeError::from);
                self.flush_events();
                let ended = result.is_ok();
                if reply.send(result).is_err() {
                    debug!("EndTurn reply channel closed (caller dropped)");
                }
                if ended {
                    self.drive_ai().await;
                }
            }
            Command::Move {
                unit,
                destination,
                reply,
            } => {
                let result = self.battle.try_move(unit, destination);
                self.flush_events();
                if let Ok(outcome) = &result {
                    self.animator.animate(unit, &outcome.path).await;
                }
                if reply.send(result.map_err(RuntimeError::from)).is_err() {
                    debug!("Move reply channel closed (caller dropped)");
                }
                self.schedule_auto_end();
            }
            Command::UndoMove { unit, reply } => {
                let result = self.battle.undo_move(unit).map_err(RuntimeError::from);
                self.flush_events();
                if reply.send(result).is_err() {
                    debug!("UndoMove reply channel closed (caller dropped)");
                }
                self.schedule_auto_end();
            }
            Command::Attack {
                attacker,
                defender,
                reply,
            } => {
                let result = self
                    .battle
                    .try_attack(attacker, defender)
                    .map_err(RuntimeError::from);
                self.flush_events();
                if reply.send(result).is_err() {
                    debug!("Attack reply channel closed (caller dropped)");
                }
                self.schedule_auto_end();
            }
            Command::CastSpell {
                caster,
                spell,
                target,
                reply,
            } => {
                let result = self
                    .battle
                    .try_cast_spell(caster, spell, target)
                    .map_err(RuntimeError::from);
                self.flush_events();
                if reply.send(result).is_err() {
                    debug!("CastSpell reply channel closed (caller dropped)");
                }
                self.schedule_auto_end();
            }
            Command::MovementRange { unit, reply } => {
                let result = self.battle.movement_range(unit).map_err(RuntimeError::from);
                if let Ok(range) = &result {
                    self.event_bus
                        .publish(Event::Targeting(TargetingEvent::RangeComputed {
                            unit,
                            cells: range.positions().collect(),
                        }));
                }
                if reply.send(result).is_err() {
                    debug!("MovementRange reply channel closed (caller dropped)");
                }
            }
            Command::AttackableTargets { unit, reply } => {
                let result = self
                    .battle
                    .attackable_targets(unit)
                    .map_err(RuntimeError::from);
                if let Ok(targets) = &result {
                    self.event_bus
                        .publish(Event::Targeting(TargetingEvent::TargetsComputed {
                            unit,
                            targets: targets.clone(),
                        }));
                }
                if reply.send(result).is_err() {
                    debug!("AttackableTargets reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.battle.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Publishes every event the engine buffered since the last flush.
    fn flush_events(&mut self) {
        self.event_bus.publish_battle(self.battle.drain_events());
    }

    fn active_controller(&self) -> Option<(UnitId, Controller)> {
        if !self.battle.state().is_turn() {
            return None;
        }
        let unit = self.battle.active_unit()?;
        let team = self.battle.unit(unit).map(UnitActor::team)?;
        Some((unit, self.battle.config().controllers.for_team(team)))
    }

    /// Plays AI-controlled turns until a human unit is up, the battle ends,
    /// or the AI stops making progress.
    async fn drive_ai(&mut self) {
        let mut watch = StalemateWatch::default();
        while let Some((unit, Controller::Ai)) = self.active_controller() {
            self.pending_end = None;
            self.run_ai_turn(unit).await;
            match self.battle.end_turn() {
                Ok(advance) => debug!(target: "tactics::runtime", %unit, ?advance, "AI turn ended"),
                Err(error) => {
                    warn!(target: "tactics::runtime", %unit, %error, "failed to end AI turn");
                    self.flush_events();
                    break;
                }
            }
            self.flush_events();

            if watch.is_stalled(&self.battle) {
                let turn = self.battle.turns_started();
                let active = self.battle.active_unit();
                warn!(target: "tactics::runtime", turn, ?active, "AI turns no longer change the battle; pausing");
                self.event_bus
                    .publish(Event::Control(ControlEvent::AiStalled { turn, active }));
                break;
            }
            // Queued commands get a chance to run between AI turns.
            tokio::task::yield_now().await;
        }
        self.schedule_auto_end();
    }

    async fn run_ai_turn(&mut self, unit: UnitId) {
        let mut turn = AiTurn::new(unit, self.pacing.ai_step_delay);
        while let Some(suspend) = turn.resume(&mut self.battle) {
            self.flush_events();
            match suspend {
                Suspend::Delay(delay) => sleep(delay).await,
                Suspend::Movement { unit, path } => self.animator.animate(unit, &path).await,
            }
        }
        self.flush_events();
    }

    /// Arms the auto-end timer when the active human unit has nothing left
    /// to do; disarms it otherwise.
    fn schedule_auto_end(&mut self) {
        self.pending_end = match self.active_controller() {
            Some((unit, Controller::Human)) if !self.battle.has_legal_action(unit) => {
                let turn = self.battle.turns_started();
                if self
                    .pending_end
                    .is_some_and(|pending| pending.unit == unit && pending.turn == turn)
                {
                    return;
                }
                debug!(target: "tactics::runtime", %unit, turn, "no legal action left; auto-ending turn");
                Some(PendingEnd {
                    unit,
                    turn,
                    deadline: Instant::now() + self.pacing.auto_end_delay,
                })
            }
            _ => None,
        };
    }

    async fn auto_end_turn(&mut self) {
        let Some(pending) = self.pending_end.take() else {
            return;
        };
        if self.battle.active_unit() != Some(pending.unit)
            || self.battle.turns_started() != pending.turn
        {
            return;
        }
        match self.battle.end_turn() {
            Ok(advance) => {
                info!(target: "tactics::runtime", unit = %pending.unit, ?advance, "turn auto-ended")
            }
            Err(error) => {
                warn!(target: "tactics::runtime", unit = %pending.unit, %error, "auto end turn failed")
            }
        }
        self.flush_events();
        self.drive_ai().await;
    }
}

/// Detects AI turns that keep ending without changing any unit.
#[derive(Debug, Default)]
struct StalemateWatch {
    baseline: Vec<UnitSnapshot>,
    quiet_turns: usize,
}

impl StalemateWatch {
    /// Records the battle after one AI turn. True once a whole cycle of
    /// turns has gone by with every unit unchanged.
    fn is_stalled(&mut self, battle: &Battle) -> bool {
        let BattleSnapshot {
            units, turn_order, ..
        } = battle.snapshot();
        if units == self.baseline {
            self.quiet_turns += 1;
        } else {
            self.baseline = units;
            self.quiet_turns = 0;
        }
        self.quiet_turns >= turn_order.len().max(1)
    }
}
