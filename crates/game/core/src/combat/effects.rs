//! Effect application (buffs, debuffs, heals).

use tracing::debug;

use crate::config::CombatTuning;
use crate::env::EffectPayload;
use crate::state::{Effect, EffectKind, EffectSlot, UnitActor};

/// Why an effect did not land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    /// The target holds Immunity and the effect is a debuff kind.
    Immune,
    /// The target's effect table is full.
    NoRoom,
    /// The target is dead.
    TargetDown,
}

/// Outcome of [`apply_effect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectApplication {
    /// Stored as a new entry.
    Applied(Effect),
    /// Overwrote an entry of the same kind.
    Refreshed(Effect),
    /// Instant heal; carries the HP actually restored.
    Healed(u32),
    Rejected(RejectReason),
}

/// Applies an effect payload to `target`.
///
/// Same-kind effects refresh instead of stacking. Immunity blocks debuff
/// kinds only; heals always go through. Stat changes re-derive the target's
/// pool maxima immediately.
pub fn apply_effect(
    target: &mut UnitActor,
    payload: EffectPayload,
    tuning: &CombatTuning,
) -> EffectApplication {
    if !target.is_alive() {
        return EffectApplication::Rejected(RejectReason::TargetDown);
    }

    if payload.kind.is_instant() {
        let healed = target.heal(payload.magnitude.max(0) as u32);
        debug!(target: "tactics::combat", unit = %target.id(), healed, "instant heal");
        return EffectApplication::Healed(healed);
    }

    if payload.kind.is_debuff() && target.has_effect(EffectKind::Immunity) {
        debug!(target: "tactics::combat", unit = %target.id(), kind = %payload.kind, "immune to effect");
        return EffectApplication::Rejected(RejectReason::Immune);
    }

    let effect = Effect::new(payload.kind, payload.magnitude, payload.duration);
    let slot = target.effects_mut().upsert(effect);
    let stored = target.effects().get(payload.kind).copied().unwrap_or(effect);

    let application = match slot {
        EffectSlot::Inserted => EffectApplication::Applied(stored),
        EffectSlot::Refreshed => EffectApplication::Refreshed(stored),
        EffectSlot::Full => return EffectApplication::Rejected(RejectReason::NoRoom),
    };

    if matches!(payload.kind, EffectKind::Buff(_) | EffectKind::Debuff(_)) {
        target.refresh_maxima(tuning);
    }

    debug!(
        target: "tactics::combat",
        unit = %target.id(),
        kind = %payload.kind,
        magnitude = stored.magnitude,
        remaining = stored.remaining,
        "effect applied"
    );
    application
}
