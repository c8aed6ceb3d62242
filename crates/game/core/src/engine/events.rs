//! Structured events emitted by the battle.
//!
//! The engine buffers events in emission order; callers drain them with
//! [`super::Battle::drain_events`] after each command.

use super::{BattleOutcome, BattleState};
use crate::combat::{RejectReason, SpellTarget};
use crate::env::SpellId;
use crate::state::{Effect, EffectKind, Position, Team, UnitId, UnitSnapshot};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    StateChanged {
        from: BattleState,
        to: BattleState,
    },
    UnitDeployed {
        unit: UnitId,
        position: Position,
    },
    TurnStarted {
        unit: UnitId,
        team: Team,
        /// 1-based count of turns started in this battle.
        turn: u32,
    },
    TurnEnded {
        unit: UnitId,
    },
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
        /// Cells entered, in order, ending at `to`.
        path: Vec<Position>,
        mp_spent: u32,
    },
    MoveUndone {
        unit: UnitId,
        from: Position,
        to: Position,
        mp_refunded: u32,
    },
    /// `source` is `None` for damage-over-time ticks.
    DamageApplied {
        source: Option<UnitId>,
        target: UnitId,
        amount: u32,
        critical: bool,
        missed: bool,
        remaining_hp: u32,
    },
    Healed {
        unit: UnitId,
        amount: u32,
    },
    EffectApplied {
        unit: UnitId,
        effect: Effect,
        refreshed: bool,
    },
    EffectRejected {
        unit: UnitId,
        kind: EffectKind,
        reason: RejectReason,
    },
    EffectExpired {
        unit: UnitId,
        kind: EffectKind,
    },
    SpellCast {
        caster: UnitId,
        spell: SpellId,
        target: SpellTarget,
    },
    UnitDied {
        unit: UnitId,
        team: Team,
    },
    BattleResult {
        outcome: BattleOutcome,
        survivors: Vec<UnitSnapshot>,
    },
}

/// Coarse grouping used by subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EventCategory {
    /// Phase transitions, deployment, and results.
    Battle,
    /// Turn boundaries, movement, and effect bookkeeping.
    Turn,
    /// Damage, heals, deaths, and spell casts.
    Combat,
}

impl BattleEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            BattleEvent::StateChanged { .. }
            | BattleEvent::UnitDeployed { .. }
            | BattleEvent::BattleResult { .. } => EventCategory::Battle,

            BattleEvent::TurnStarted { .. }
            | BattleEvent::TurnEnded { .. }
            | BattleEvent::UnitMoved { .. }
            | BattleEvent::MoveUndone { .. }
            | BattleEvent::EffectExpired { .. } => EventCategory::Turn,

            BattleEvent::DamageApplied { .. }
            | BattleEvent::Healed { .. }
            | BattleEvent::EffectApplied { .. }
            | BattleEvent::EffectRejected { .. }
            | BattleEvent::SpellCast { .. }
            | BattleEvent::UnitDied { .. } => EventCategory::Combat,
        }
    }
}
