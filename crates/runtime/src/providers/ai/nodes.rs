//! Action nodes for the AI behavior tree.
//!
//! Each node inspects the battle through [`AiContext`] and, when it finds
//! something to do, records an [`AiDecision`] and succeeds. A node that
//! finds nothing fails so the selector falls through to the next priority.

use behavior_tree::{Behavior, Status};
use tactics_core::{Position, PoolKind, SpellId, SpellTarget};

use super::context::{AiContext, AiDecision};

/// Casts the most valuable castable spell.
///
/// Area spells win when any aimable cell catches an enemy; the cell that
/// catches the most enemies is chosen (first found on ties). Otherwise the
/// first castable single-target spell is used: buffs go to the most wounded
/// ally, damage and debuffs to the weakest enemy.
pub struct CastBestSpell;

impl<'a> Behavior<AiContext<'a>> for CastBestSpell {
    fn tick(&self, ctx: &mut AiContext<'a>) -> Status {
        match choose_spell(ctx) {
            Some((spell, target)) => {
                ctx.decide(AiDecision::CastSpell { spell, target });
                Status::Success
            }
            None => Status::Failure,
        }
    }

    fn label(&self) -> &'static str {
        "cast best spell"
    }
}

fn choose_spell(ctx: &AiContext<'_>) -> Option<(SpellId, SpellTarget)> {
    let battle = ctx.battle;
    let caster = ctx.actor()?;
    let castable = battle.castable_spells(ctx.unit).ok()?;

    let mut best_area: Option<(SpellId, Position, usize)> = None;
    for &spell in &castable {
        let Some(known) = caster.spell(spell) else {
            continue;
        };
        if !known.def.kind.targets_cell() {
            continue;
        }
        for cell in battle.spell_target_cells(ctx.unit, spell).unwrap_or_default() {
            let caught = battle
                .area_victims(ctx.unit, spell, cell)
                .map_or(0, |victims| victims.len());
            if caught > best_area.map_or(0, |(_, _, best)| best) {
                best_area = Some((spell, cell, caught));
            }
        }
    }
    if let Some((spell, cell, _)) = best_area {
        return Some((spell, SpellTarget::Cell(cell)));
    }

    for &spell in &castable {
        let Some(known) = caster.spell(spell) else {
            continue;
        };
        if known.def.kind.targets_cell() {
            continue;
        }
        let candidates = battle.spell_unit_targets(ctx.unit, spell).unwrap_or_default();
        let target = if known.def.kind.targets_allies() {
            ctx.most_wounded(&candidates)
        } else {
            ctx.weakest(&candidates)
        };
        if let Some(target) = target {
            return Some((spell, SpellTarget::Unit(target)));
        }
    }
    None
}

/// Attacks the weakest enemy within weapon reach.
pub struct AttackWeakest;

impl<'a> Behavior<AiContext<'a>> for AttackWeakest {
    fn tick(&self, ctx: &mut AiContext<'a>) -> Status {
        let Some(actor) = ctx.actor() else {
            return Status::Failure;
        };
        if actor.pool(PoolKind::Ap).current() < ctx.battle.config().attack_ap_cost {
            return Status::Failure;
        }
        let targets = ctx.battle.attackable_targets(ctx.unit).unwrap_or_default();
        match ctx.weakest(&targets) {
            Some(target) => {
                ctx.decide(AiDecision::Attack { target });
                Status::Success
            }
            None => Status::Failure,
        }
    }

    fn label(&self) -> &'static str {
        "attack weakest"
    }
}

/// Moves to the reachable cell closest to the nearest living enemy.
///
/// Fails when no enemy is left or when standing still is already as close
/// as the unit can get.
pub struct AdvanceOnNearest;

impl<'a> Behavior<AiContext<'a>> for AdvanceOnNearest {
    fn tick(&self, ctx: &mut AiContext<'a>) -> Status {
        let Some(origin) = ctx.position() else {
            return Status::Failure;
        };
        let Some(goal) = ctx
            .enemies()
            .map(|enemy| enemy.position())
            .min_by_key(|position| origin.manhattan(*position))
        else {
            return Status::Failure;
        };
        let Ok(range) = ctx.battle.movement_range(ctx.unit) else {
            return Status::Failure;
        };

        // The origin comes first in the range, so it wins every tie.
        match range.positions().min_by_key(|cell| cell.manhattan(goal)) {
            Some(destination) if destination != origin => {
                ctx.decide(AiDecision::Move { destination });
                Status::Success
            }
            _ => Status::Failure,
        }
    }

    fn label(&self) -> &'static str {
        "advance on nearest"
    }
}

/// Always succeeds with [`AiDecision::EndTurn`].
pub struct EndTurn;

impl<'a> Behavior<AiContext<'a>> for EndTurn {
    fn tick(&self, ctx: &mut AiContext<'a>) -> Status {
        ctx.decide(AiDecision::EndTurn);
        Status::Success
    }

    fn label(&self) -> &'static str {
        "end turn"
    }
}
