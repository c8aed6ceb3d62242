//! Cloneable façade for issuing commands to the battle worker.
//!
//! [`BattleHandle`] hides channel plumbing and offers async helpers for every
//! battle command, plus subscriptions to specific event topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use tactics_core::{
    AttackReport, BattleSnapshot, MoveOutcome, MovementRange, Position, SpellId, SpellReport,
    SpellTarget, TurnAdvance, UnitId,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the running battle
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl BattleHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Move a player unit to another free cell during deployment
    pub async fn deploy(&self, unit: UnitId, position: Position) -> Result<()> {
        self.request(|reply| Command::Deploy {
            unit,
            position,
            reply,
        })
        .await?
    }

    /// Leave deployment and start the first turn.
    ///
    /// Resolves once the battle has started; AI-controlled turns that follow
    /// are played by the worker afterwards and observed through events.
    pub async fn start_battle(&self) -> Result<TurnAdvance> {
        self.request(|reply| Command::StartBattle { reply }).await?
    }

    /// End the active unit's turn
    pub async fn end_turn(&self) -> Result<TurnAdvance> {
        self.request(|reply| Command::EndTurn { reply }).await?
    }

    /// Move the active unit; resolves after the movement has been animated
    pub async fn move_unit(&self, unit: UnitId, destination: Position) -> Result<MoveOutcome> {
        self.request(|reply| Command::Move {
            unit,
            destination,
            reply,
        })
        .await?
    }

    /// Undo the active unit's last move this turn
    pub async fn undo_move(&self, unit: UnitId) -> Result<Position> {
        self.request(|reply| Command::UndoMove { unit, reply }).await?
    }

    pub async fn attack(&self, attacker: UnitId, defender: UnitId) -> Result<AttackReport> {
        self.request(|reply| Command::Attack {
            attacker,
            defender,
            reply,
        })
        .await?
    }

    pub async fn cast_spell(
        &self,
        caster: UnitId,
        spell: SpellId,
        target: SpellTarget,
    ) -> Result<SpellReport> {
        self.request(|reply| Command::CastSpell {
            caster,
            spell,
            target,
            reply,
        })
        .await?
    }

    /// Cells `unit` can reach; also published on [`Topic::Targeting`]
    pub async fn movement_range(&self, unit: UnitId) -> Result<MovementRange> {
        self.request(|reply| Command::MovementRange { unit, reply })
            .await?
    }

    /// Enemies `unit` can attack; also published on [`Topic::Targeting`]
    pub async fn attackable_targets(&self, unit: UnitId) -> Result<Vec<UnitId>> {
        self.request(|reply| Command::AttackableTargets { unit, reply })
            .await?
    }

    /// Query the current battle (read-only snapshot)
    pub async fn snapshot(&self) -> Result<BattleSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - Phase changes, deployment, results
    /// - `Topic::Turn` - Turn boundaries, movement, effect expiry
    /// - `Topic::Combat` - Damage, heals, effects, deaths, casts
    /// - `Topic::Targeting` - Range and target queries
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tactics_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
