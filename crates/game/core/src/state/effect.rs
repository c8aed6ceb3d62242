//! Timed effects attached to units.
//!
//! # Refresh semantics
//!
//! A unit holds at most one entry per [`EffectKind`]. Re-applying a kind
//! overwrites magnitude and duration in place instead of stacking.
//!
//! # Duration
//!
//! `remaining` counts full turn cycles. The engine decrements every entry
//! once per cycle (when the turn order wraps) and discards entries that reach
//! zero.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::stats::{StatBlock, StatKind};

/// Effect family. Stat buffs/debuffs are distinct kinds per attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    /// Adds `magnitude` to an attribute.
    Buff(StatKind),
    /// Subtracts `magnitude` from an attribute.
    Debuff(StatKind),
    /// Unit starts its turns with zero MP and AP.
    Stun,
    /// Heals `magnitude` at the start of each of the unit's turns.
    HealOverTime,
    /// Damages `magnitude` at the start of each of the unit's turns.
    DamageOverTime,
    /// Rejects new debuff-kind effects.
    Immunity,
    /// Instant heal. Resolved on application, never stored.
    Heal,
}

impl EffectKind {
    /// Kinds blocked by [`EffectKind::Immunity`].
    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            EffectKind::Debuff(_) | EffectKind::Stun | EffectKind::DamageOverTime
        )
    }

    /// Whether the kind is resolved immediately instead of being stored.
    pub const fn is_instant(self) -> bool {
        matches!(self, EffectKind::Heal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub magnitude: i32,
    /// Full turn cycles left.
    pub remaining: u32,
}

impl Effect {
    pub const fn new(kind: EffectKind, magnitude: i32, remaining: u32) -> Self {
        Self {
            kind,
            magnitude,
            remaining,
        }
    }
}

/// Result of storing an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectSlot {
    Inserted,
    /// An entry of the same kind was overwritten.
    Refreshed,
    /// No room left; nothing changed.
    Full,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: ArrayVec<Effect, { BattleConfig::MAX_ACTIVE_EFFECTS }>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `effect`, overwriting any entry of the same kind.
    ///
    /// Durations below one cycle are raised to one so every stored effect is
    /// observable for at least one turn.
    pub fn upsert(&mut self, effect: Effect) -> EffectSlot {
        let effect = Effect {
            remaining: effect.remaining.max(1),
            ..effect
        };

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
            return EffectSlot::Refreshed;
        }

        match self.effects.try_push(effect) {
            Ok(()) => EffectSlot::Inserted,
            Err(_) => EffectSlot::Full,
        }
    }

    pub fn get(&self, kind: EffectKind) -> Option<&Effect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn count_of(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }

    pub fn remove(&mut self, kind: EffectKind) -> Option<Effect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Decrements every entry by one cycle and removes those reaching zero.
    ///
    /// Returns the expired entries in storage order.
    pub fn tick(&mut self) -> Vec<Effect> {
        let mut expired = Vec::new();
        self.effects.retain(|effect| {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(*effect);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Net attribute adjustment from stat buffs and debuffs.
    pub fn stat_modifiers(&self) -> StatBlock {
        self.effects
            .iter()
            .fold(StatBlock::ZERO, |mut acc, effect| {
                match effect.kind {
                    EffectKind::Buff(stat) => acc.adjust(stat, effect.magnitude),
                    EffectKind::Debuff(stat) => acc.adjust(stat, -effect.magnitude),
                    _ => {}
                }
                acc
            })
    }

    pub fn stat_modifier(&self, stat: StatKind) -> i32 {
        self.stat_modifiers().get(stat)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
