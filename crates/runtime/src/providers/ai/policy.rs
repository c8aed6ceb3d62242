//! The AI's priority list, expressed as a behavior tree.
//!
//! ```text
//! Selector
//! ├── Sequence [fresh]  → CastBestSpell
//! ├── AttackWeakest
//! ├── Sequence [fresh]  → AdvanceOnNearest
//! └── EndTurn
//! ```
//!
//! `fresh` holds until the unit has moved; after a move only an attack is
//! reconsidered before the turn ends. The tree is evaluated again after
//! every successful attack or cast, so leftover AP is spent in priority
//! order.

use behavior_tree::{Behavior, Node, builder};
use tactics_core::{Battle, UnitId};
use tracing::trace;

use super::context::{AiContext, AiDecision};
use super::nodes::{AdvanceOnNearest, AttackWeakest, CastBestSpell, EndTurn};

pub fn policy<'a>() -> Node<'a, AiContext<'a>> {
    builder::selector(vec![
        builder::guarded("fresh", |ctx: &AiContext<'a>| !ctx.moved, builder::node(CastBestSpell)),
        builder::node(AttackWeakest),
        builder::guarded("fresh", |ctx: &AiContext<'a>| !ctx.moved, builder::node(AdvanceOnNearest)),
        builder::node(EndTurn),
    ])
}

/// Evaluates the policy for `unit` against the current battle.
pub fn decide(battle: &Battle, unit: UnitId, moved: bool) -> AiDecision {
    let tree = policy();
    let mut ctx = AiContext::new(battle, unit, moved);
    let status = tree.tick(&mut ctx);
    let decision = ctx.take_decision().unwrap_or(AiDecision::EndTurn);
    trace!(target: "tactics::ai", %unit, moved, ?status, ?decision, "policy evaluated");
    decision
}

#[cfg(test)]
mod tests {
    use tactics_core::{
        BattleConfig, ClassDef, ClassId, Controllers, DefinitionTables, EffectKind, EffectPayload,
        GridModel, Position, ScriptedRng, SpellDef, SpellId, SpellKind, SpellTarget, StatBlock,
        StatKind, Team, UnitSpec, WeaponDef, WeaponId,
    };

    use super::*;

    const SOLDIER: ClassId = ClassId(1);
    const CASTER: ClassId = ClassId(2);
    const SCOUT: ClassId = ClassId(3);
    const SWORD: WeaponId = WeaponId(1);
    const BLAST: SpellId = SpellId(1);
    const MEND: SpellId = SpellId(2);

    fn tables() -> DefinitionTables {
        DefinitionTables::new()
            .with_class(
                ClassDef::new(SOLDIER, "soldier")
                    .with_base(StatBlock::new(6, 0, 0, 0, 0))
                    .with_hp(20, 0)
                    .with_pools(3, 1, 0),
            )
            .with_class(ClassDef::new(CASTER, "caster").with_hp(20, 0).with_pools(2, 1, 2))
            .with_class(ClassDef::new(SCOUT, "scout").with_hp(8, 0).with_pools(4, 1, 0))
            .with_weapon(WeaponDef::new(SWORD, "sword", 4, 1))
            .with_spell(
                SpellDef::new(BLAST, "blast", SpellKind::AreaDamage)
                    .with_power(4, StatKind::Intelligence)
                    .with_range(6)
                    .with_aoe_radius(1)
                    .with_costs(1, 1),
            )
            .with_spell(
                SpellDef::new(MEND, "mend", SpellKind::Buff)
                    .with_range(6)
                    .with_costs(1, 1)
                    .with_primary(EffectPayload::new(EffectKind::HealOverTime, 3, 2)),
            )
    }

    fn battle(roster: Vec<UnitSpec>) -> Battle {
        let mut battle = Battle::builder()
            .config(BattleConfig::default().with_controllers(Controllers::autonomous()))
            .grid(GridModel::new(8, 8))
            .tables(tables())
            .rng(ScriptedRng::default().with_fallback(0.5))
            .build()
            .unwrap();
        battle.initialize(roster).unwrap();
        battle.start_battle().unwrap();
        battle
    }

    fn soldier(id: u32, team: Team, x: i32, y: i32) -> UnitSpec {
        UnitSpec::new(UnitId(id), format!("soldier-{id}"), team, SOLDIER, Position::new(x, y))
            .with_weapon(SWORD)
    }

    #[test]
    fn attacks_the_weakest_adjacent_enemy() {
        let battle = battle(vec![
            soldier(1, Team::Enemy, 3, 3),
            soldier(2, Team::Player, 3, 2),
            UnitSpec::new(UnitId(3), "scout", Team::Player, SCOUT, Position::new(4, 3)),
        ]);
        assert_eq!(
            decide(&battle, UnitId(1), false),
            AiDecision::Attack { target: UnitId(3) }
        );
    }

    #[test]
    fn advances_when_nobody_is_in_reach() {
        let battle = battle(vec![
            soldier(1, Team::Enemy, 0, 0),
            soldier(2, Team::Player, 7, 0),
        ]);
        let decision = decide(&battle, UnitId(1), false);
        assert_eq!(
            decision,
            AiDecision::Move {
                destination: Position::new(3, 0)
            }
        );
    }

    #[test]
    fn ends_the_turn_after_moving_out_of_reach() {
        let battle = battle(vec![
            soldier(1, Team::Enemy, 0, 0),
            soldier(2, Team::Player, 7, 0),
        ]);
        assert_eq!(decide(&battle, UnitId(1), true), AiDecision::EndTurn);
    }

    #[test]
    fn area_spell_aims_at_the_biggest_cluster() {
        let caster = UnitSpec::new(UnitId(1), "caster", Team::Enemy, CASTER, Position::new(0, 0))
            .with_spell(BLAST);
        let battle = battle(vec![
            caster,
            soldier(2, Team::Player, 5, 0),
            soldier(3, Team::Player, 2, 3),
            soldier(4, Team::Player, 3, 3),
        ]);
        let AiDecision::CastSpell {
            spell,
            target: SpellTarget::Cell(cell),
        } = decide(&battle, UnitId(1), false)
        else {
            panic!("expected an area cast");
        };
        assert_eq!(spell, BLAST);
        let caught = battle.area_victims(UnitId(1), BLAST, cell).unwrap();
        assert_eq!(caught.len(), 2);
    }

    #[test]
    fn buffs_go_to_the_most_wounded_ally() {
        let healer = UnitSpec::new(UnitId(1), "healer", Team::Enemy, CASTER, Position::new(0, 0))
            .with_spell(MEND);
        let battle = battle(vec![
            healer,
            soldier(2, Team::Enemy, 1, 0),
            soldier(3, Team::Player, 7, 7),
        ]);
        let decision = decide(&battle, UnitId(1), false);
        assert!(matches!(
            decision,
            AiDecision::CastSpell {
                spell: MEND,
                target: SpellTarget::Unit(_)
            }
        ));
    }
}
