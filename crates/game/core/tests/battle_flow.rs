use tactics_core::{
    AttackOutcome, Battle, BattleEvent, BattleOutcome, BattleState, ClassDef, ClassId, CommandError,
    CommandKind, DefinitionTables, EffectApplication, EffectKind, EffectPayload, GridModel,
    PlacementError, PoolKind, Position, RejectReason, ScriptedRng, SpellDef, SpellId, SpellKind,
    SpellTarget, StatBlock, StatKind, Team, TurnAdvance, UnitId, UnitSpec, WeaponDef, WeaponId,
};

const FIGHTER: ClassId = ClassId(1);
const BRUTE: ClassId = ClassId(2);
const MAGE: ClassId = ClassId(3);
const GOBLIN: ClassId = ClassId(4);

const SWORD: WeaponId = WeaponId(1);
const BOW: WeaponId = WeaponId(2);

const FIREBALL: SpellId = SpellId(1);
const WARCRY: SpellId = SpellId(2);
const HEX: SpellId = SpellId(3);
const SLUMBER: SpellId = SpellId(4);
const GUARD: SpellId = SpellId(5);
const FROSTFALL: SpellId = SpellId(6);
const WARD: SpellId = SpellId(7);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tables() -> DefinitionTables {
    DefinitionTables::new()
        .with_class(
            ClassDef::new(FIGHTER, "fighter")
                .with_base(StatBlock::new(10, 0, 0, 0, 0))
                .with_hp(30, 0)
                .with_pools(2, 1, 0),
        )
        .with_class(
            ClassDef::new(BRUTE, "brute")
                .with_base(StatBlock::new(4, 0, 0, 3, 0))
                .with_hp(20, 0)
                .with_pools(2, 1, 0),
        )
        .with_class(ClassDef::new(MAGE, "mage").with_hp(18, 0).with_pools(2, 1, 3))
        .with_class(ClassDef::new(GOBLIN, "goblin").with_hp(4, 0).with_pools(2, 1, 0))
        .with_weapon(WeaponDef::new(SWORD, "sword", 5, 1))
        .with_weapon(WeaponDef::new(BOW, "bow", 3, 4).with_line_of_sight(true))
        .with_spell(
            SpellDef::new(FIREBALL, "fireball", SpellKind::AreaDamage)
                .with_power(5, StatKind::Intelligence)
                .with_range(6)
                .with_aoe_radius(2)
                .with_costs(1, 1),
        )
        .with_spell(
            SpellDef::new(WARCRY, "warcry", SpellKind::Buff)
                .with_range(0)
                .with_primary(EffectPayload::new(EffectKind::Buff(StatKind::Strength), 3, 2)),
        )
        .with_spell(
            SpellDef::new(HEX, "hex", SpellKind::Debuff)
                .with_range(6)
                .with_primary(EffectPayload::new(EffectKind::DamageOverTime, 50, 2)),
        )
        .with_spell(
            SpellDef::new(SLUMBER, "slumber", SpellKind::Debuff)
                .with_range(6)
                .with_primary(EffectPayload::new(EffectKind::Stun, 0, 1)),
        )
        .with_spell(
            SpellDef::new(GUARD, "guard", SpellKind::Buff)
                .with_range(0)
                .with_cooldown(2)
                .with_primary(EffectPayload::new(EffectKind::Buff(StatKind::Defense), 2, 1)),
        )
        .with_spell(
            SpellDef::new(FROSTFALL, "frostfall", SpellKind::AreaDamage)
                .with_power(5, StatKind::Intelligence)
                .with_range(6)
                .with_aoe_radius(1)
                .with_costs(1, 1)
                .with_secondary(EffectPayload::new(EffectKind::Debuff(StatKind::Speed), 2, 2)),
        )
        .with_spell(
            SpellDef::new(WARD, "ward", SpellKind::Buff)
                .with_range(0)
                .with_primary(EffectPayload::new(EffectKind::Immunity, 0, 2)),
        )
}

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn fighter(id: u32, spawn: Position) -> UnitSpec {
    UnitSpec::new(UnitId(id), "fighter", Team::Player, FIGHTER, spawn).with_weapon(SWORD)
}

fn mage(id: u32, spawn: Position, spell: SpellId) -> UnitSpec {
    UnitSpec::new(UnitId(id), "mage", Team::Player, MAGE, spawn).with_spell(spell)
}

fn brute(id: u32, spawn: Position) -> UnitSpec {
    UnitSpec::new(UnitId(id), "brute", Team::Enemy, BRUTE, spawn)
}

/// Rolls of 0.5 always hit (chance 0.8) and never crit (chance 0.05).
fn deployed(grid: GridModel, roster: Vec<UnitSpec>) -> Battle {
    init_tracing();
    let mut battle = Battle::builder()
        .grid(grid)
        .tables(tables())
        .rng(ScriptedRng::default().with_fallback(0.5))
        .build()
        .unwrap();
    battle.initialize(roster).unwrap();
    battle
}

fn started(grid: GridModel, roster: Vec<UnitSpec>) -> Battle {
    let mut battle = deployed(grid, roster);
    battle.start_battle().unwrap();
    battle.drain_events();
    battle
}

fn hp(battle: &Battle, id: u32) -> u32 {
    battle.unit(UnitId(id)).unwrap().hp()
}

#[test]
fn attack_deals_strength_plus_weapon_minus_defense() {
    let mut battle = started(
        GridModel::new(5, 5),
        vec![fighter(1, pos(1, 1)), brute(2, pos(2, 1))],
    );

    let report = battle.try_attack(UnitId(1), UnitId(2)).unwrap();

    assert_eq!(report.outcome, AttackOutcome::Hit);
    assert_eq!(report.damage, 12);
    assert_eq!(report.defender_hp, 8);
    assert!(!report.defender_died);
    assert_eq!(battle.unit(UnitId(1)).unwrap().pool(PoolKind::Ap).current(), 0);
    assert!(battle.drain_events().contains(&BattleEvent::DamageApplied {
        source: Some(UnitId(1)),
        target: UnitId(2),
        amount: 12,
        critical: false,
        missed: false,
        remaining_hp: 8,
    }));
}

#[test]
fn movement_range_covers_open_board_within_budget() {
    let battle = started(
        GridModel::new(5, 5),
        vec![fighter(1, pos(2, 2)), brute(2, pos(4, 4))],
    );

    let range = battle.movement_range(UnitId(1)).unwrap();

    assert_eq!(range.len(), 13);
    assert!(range.positions().all(|cell| cell.manhattan(pos(2, 2)) <= 2));
}

#[test]
fn movement_range_skips_walls_and_cells_behind_them() {
    let grid = GridModel::from_ascii(&[
        ".....",
        "..#..",
        ".....",
        ".....",
        ".....",
    ])
    .unwrap();
    let battle = started(grid, vec![fighter(1, pos(2, 2)), brute(2, pos(4, 4))]);

    let range = battle.movement_range(UnitId(1)).unwrap();

    assert_eq!(range.len(), 11);
    assert!(!range.contains(pos(2, 1)));
    assert!(!range.contains(pos(2, 0)));
}

#[test]
fn move_then_undo_refunds_exact_mp() {
    let mut battle = started(
        GridModel::new(5, 5),
        vec![fighter(1, pos(2, 2)), brute(2, pos(4, 4))],
    );

    let outcome = battle.try_move(UnitId(1), pos(2, 0)).unwrap();
    assert_eq!(outcome.path, vec![pos(2, 1), pos(2, 0)]);
    assert_eq!(outcome.mp_spent, 2);
    assert_eq!(outcome.mp_remaining, 0);
    assert_eq!(battle.grid().occupant_at(pos(2, 0)), Some(UnitId(1)));
    assert_eq!(battle.grid().occupant_at(pos(2, 2)), None);

    assert_eq!(battle.undo_move(UnitId(1)), Ok(pos(2, 2)));
    let unit = battle.unit(UnitId(1)).unwrap();
    assert_eq!(unit.position(), pos(2, 2));
    assert_eq!(unit.pool(PoolKind::Mp).current(), 2);
    assert_eq!(battle.grid().occupant_at(pos(2, 2)), Some(UnitId(1)));

    assert_eq!(
        battle.undo_move(UnitId(1)),
        Err(CommandError::NothingToUndo(UnitId(1)))
    );
}

#[test]
fn undo_is_locked_after_attacking() {
    let mut battle = started(
        GridModel::new(5, 5),
        vec![fighter(1, pos(1, 1)), brute(2, pos(3, 1))],
    );

    battle.try_move(UnitId(1), pos(2, 1)).unwrap();
    battle.try_attack(UnitId(1), UnitId(2)).unwrap();

    assert_eq!(
        battle.undo_move(UnitId(1)),
        Err(CommandError::UndoLocked(UnitId(1)))
    );
    assert_eq!(battle.unit(UnitId(1)).unwrap().position(), pos(2, 1));
}

#[test]
fn moving_to_an_unreachable_cell_fails_cleanly() {
    let mut battle = started(
        GridModel::new(5, 5),
        vec![fighter(1, pos(0, 0)), brute(2, pos(4, 4))],
    );

    let error = battle.try_move(UnitId(1), pos(3, 3)).unwrap_err();

    assert_eq!(
        error,
        CommandError::Unreachable {
            unit: UnitId(1),
            destination: pos(3, 3),
        }
    );
    assert_eq!(battle.grid().occupant_at(pos(0, 0)), Some(UnitId(1)));
    assert!(battle.drain_events().is_empty());
}

#[test]
fn attack_out_of_range_leaves_state_untouched() {
    let mut battle = started(
        GridModel::new(5, 5),
        vec![fighter(1, pos(0, 0)), brute(2, pos(3, 0))],
    );

    let error = battle.try_attack(UnitId(1), UnitId(2)).unwrap_err();

    assert_eq!(
        error,
        CommandError::OutOfRange {
            unit: UnitId(1),
            target: pos(3, 0),
        }
    );
    assert_eq!(battle.unit(UnitId(1)).unwrap().pool(PoolKind::Ap).current(), 1);
    assert_eq!(hp(&battle, 2), 20);
}

#[test]
fn commands_require_the_active_unit() {
    let mut battle = started(
        GridModel::new(5, 5),
        vec![fighter(1, pos(1, 1)), brute(2, pos(2, 1))],
    );

    assert_eq!(
        battle.try_attack(UnitId(2), UnitId(1)),
        Err(CommandError::NotYourTurn {
            unit: UnitId(2),
            active: Some(UnitId(1)),
        })
    );
    assert_eq!(
        battle.try_move(UnitId(9), pos(0, 0)),
        Err(CommandError::UnknownUnit(UnitId(9)))
    );
}

#[test]
fn wall_blocks_bow_shot() {
    let grid = GridModel::from_ascii(&["....", "#...", "....", "...."]).unwrap();
    let archer = UnitSpec::new(UnitId(1), "archer", Team::Player, FIGHTER, pos(0, 0)).with_weapon(BOW);
    let mut battle = started(grid, vec![archer, brute(2, pos(0, 3))]);

    assert!(!battle.line_of_sight(pos(0, 0), pos(0, 3)));
    assert!(battle.attackable_targets(UnitId(1)).unwrap().is_empty());
    assert_eq!(
        battle.try_attack(UnitId(1), UnitId(2)),
        Err(CommandError::NoLineOfSight {
            unit: UnitId(1),
            target: pos(0, 3),
        })
    );
}

#[test]
fn area_spell_hits_only_units_inside_radius() {
    let mut battle = started(
        GridModel::new(7, 7),
        vec![
            mage(1, pos(0, 0), FIREBALL),
            brute(2, pos(3, 3)),
            brute(3, pos(4, 4)),
            brute(4, pos(3, 1)),
            brute(5, pos(6, 3)),
        ],
    );

    assert_eq!(battle.castable_spells(UnitId(1)).unwrap(), vec![FIREBALL]);
    assert_eq!(
        battle.area_victims(UnitId(1), FIREBALL, pos(3, 3)).unwrap(),
        vec![UnitId(2), UnitId(3), UnitId(4)]
    );

    let report = battle
        .try_cast_spell(UnitId(1), FIREBALL, SpellTarget::Cell(pos(3, 3)))
        .unwrap();

    let hit: Vec<UnitId> = report.hits.iter().map(|hit| hit.unit).collect();
    assert_eq!(hit, vec![UnitId(2), UnitId(3), UnitId(4)]);
    assert_eq!(report.total_damage(), 15);
    for id in [2, 3, 4] {
        assert_eq!(hp(&battle, id), 15);
    }
    assert_eq!(hp(&battle, 5), 20);

    let caster = battle.unit(UnitId(1)).unwrap();
    assert_eq!(caster.pool(PoolKind::SpellSlots).current(), 2);
    assert_eq!(caster.pool(PoolKind::Ap).current(), 0);
}

#[test]
fn immune_units_take_area_damage_but_shrug_off_the_debuff() {
    let mut battle = started(
        GridModel::new(7, 7),
        vec![
            brute(1, pos(3, 3)).with_spell(WARD),
            brute(2, pos(3, 4)),
            mage(3, pos(0, 0), FROSTFALL),
        ],
    );

    assert_eq!(battle.active_unit(), Some(UnitId(1)));
    battle
        .try_cast_spell(UnitId(1), WARD, SpellTarget::Unit(UnitId(1)))
        .unwrap();
    assert!(battle.unit(UnitId(1)).unwrap().has_effect(EffectKind::Immunity));
    battle.end_turn().unwrap();
    battle.end_turn().unwrap();
    assert_eq!(battle.active_unit(), Some(UnitId(3)));
    battle.drain_events();

    let report = battle
        .try_cast_spell(UnitId(3), FROSTFALL, SpellTarget::Cell(pos(3, 3)))
        .unwrap();

    let slow = EffectKind::Debuff(StatKind::Speed);
    assert_eq!(report.hits.len(), 2);
    assert_eq!(hp(&battle, 1), 15);
    assert_eq!(hp(&battle, 2), 15);
    assert!(!battle.unit(UnitId(1)).unwrap().has_effect(slow));
    assert!(battle.unit(UnitId(2)).unwrap().has_effect(slow));

    let events = battle.drain_events();
    assert!(events.contains(&BattleEvent::EffectRejected {
        unit: UnitId(1),
        kind: slow,
        reason: RejectReason::Immune,
    }));
    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::EffectApplied { unit: UnitId(2), refreshed: false, .. }
    )));
}

#[test]
fn reapplying_a_buff_refreshes_instead_of_stacking() {
    let warrior = fighter(1, pos(0, 0)).with_spell(WARCRY);
    let mut battle = started(GridModel::new(5, 5), vec![warrior, brute(2, pos(4, 4))]);
    let tuning = battle.config().tuning.clone();

    battle
        .try_cast_spell(UnitId(1), WARCRY, SpellTarget::Unit(UnitId(1)))
        .unwrap();
    assert_eq!(battle.unit(UnitId(1)).unwrap().derived(&tuning).attack_power, 18);

    battle.end_turn().unwrap();
    battle.end_turn().unwrap();
    let buff = EffectKind::Buff(StatKind::Strength);
    assert_eq!(battle.unit(UnitId(1)).unwrap().effects().get(buff).unwrap().remaining, 1);
    battle.drain_events();

    let report = battle
        .try_cast_spell(UnitId(1), WARCRY, SpellTarget::Unit(UnitId(1)))
        .unwrap();

    assert!(matches!(report.hits[0].effects[0], EffectApplication::Refreshed(_)));
    let unit = battle.unit(UnitId(1)).unwrap();
    assert_eq!(unit.effects().count_of(buff), 1);
    assert_eq!(unit.effects().get(buff).unwrap().remaining, 2);
    assert!(battle.drain_events().iter().any(|event| matches!(
        event,
        BattleEvent::EffectApplied {
            refreshed: true,
            ..
        }
    )));
}

#[test]
fn buff_expires_after_its_cycles() {
    let warrior = fighter(1, pos(0, 0)).with_spell(WARCRY);
    let mut battle = started(GridModel::new(5, 5), vec![warrior, brute(2, pos(4, 4))]);

    battle
        .try_cast_spell(UnitId(1), WARCRY, SpellTarget::Unit(UnitId(1)))
        .unwrap();
    for _ in 0..4 {
        battle.end_turn().unwrap();
    }

    assert!(battle.unit(UnitId(1)).unwrap().effects().is_empty());
    assert!(battle.drain_events().contains(&BattleEvent::EffectExpired {
        unit: UnitId(1),
        kind: EffectKind::Buff(StatKind::Strength),
    }));
}

#[test]
fn spell_cooldown_counts_caster_turns() {
    let guard = fighter(1, pos(0, 0)).with_spell(GUARD);
    let mut battle = started(GridModel::new(5, 5), vec![guard, brute(2, pos(4, 4))]);

    battle
        .try_cast_spell(UnitId(1), GUARD, SpellTarget::Unit(UnitId(1)))
        .unwrap();
    battle.end_turn().unwrap();
    battle.end_turn().unwrap();

    assert_eq!(
        battle.try_cast_spell(UnitId(1), GUARD, SpellTarget::Unit(UnitId(1))),
        Err(CommandError::SpellOnCooldown {
            spell: GUARD,
            remaining: 1,
        })
    );
}

#[test]
fn damage_over_time_can_end_the_battle() {
    let mut battle = started(
        GridModel::new(5, 5),
        vec![mage(1, pos(0, 0), HEX), brute(2, pos(3, 0))],
    );

    let report = battle
        .try_cast_spell(UnitId(1), HEX, SpellTarget::Unit(UnitId(2)))
        .unwrap();
    assert_eq!(report.total_damage(), 0);

    let advance = battle.end_turn().unwrap();

    assert_eq!(advance, TurnAdvance::Finished(BattleOutcome::Victory));
    assert_eq!(battle.state(), BattleState::Victory);
    let events = battle.drain_events();
    assert!(events.contains(&BattleEvent::UnitDied {
        unit: UnitId(2),
        team: Team::Enemy,
    }));
    let survivors = events.iter().find_map(|event| match event {
        BattleEvent::BattleResult { survivors, .. } => Some(survivors.len()),
        _ => None,
    });
    assert_eq!(survivors, Some(1));
    assert_eq!(battle.end_turn(), Ok(TurnAdvance::Finished(BattleOutcome::Victory)));
}

#[test]
fn stunned_unit_starts_turn_without_actions() {
    let mut battle = started(
        GridModel::new(5, 5),
        vec![mage(1, pos(0, 0), SLUMBER), brute(2, pos(3, 0))],
    );

    battle
        .try_cast_spell(UnitId(1), SLUMBER, SpellTarget::Unit(UnitId(2)))
        .unwrap();
    let advance = battle.end_turn().unwrap();

    assert_eq!(
        advance,
        TurnAdvance::Next {
            unit: UnitId(2),
            team: Team::Enemy,
        }
    );
    let brute = battle.unit(UnitId(2)).unwrap();
    assert_eq!(brute.pool(PoolKind::Ap).current(), 0);
    assert_eq!(brute.pool(PoolKind::Mp).current(), 0);
    assert!(!battle.has_legal_action(UnitId(2)));
}

#[test]
fn dead_units_leave_the_turn_order() {
    let goblin = UnitSpec::new(UnitId(2), "goblin", Team::Enemy, GOBLIN, pos(2, 1));
    let mut battle = started(
        GridModel::new(5, 5),
        vec![fighter(1, pos(1, 1)), goblin, brute(3, pos(4, 4))],
    );

    let report = battle.try_attack(UnitId(1), UnitId(2)).unwrap();
    assert!(report.defender_died);
    assert_eq!(report.damage, 4);
    assert!(!battle.turn_order().contains(UnitId(2)));
    assert_eq!(battle.grid().occupant_at(pos(2, 1)), None);

    let again = battle.try_attack(UnitId(1), UnitId(2)).unwrap();
    assert_eq!(again.outcome, AttackOutcome::TargetDown);

    let advance = battle.end_turn().unwrap();
    assert_eq!(
        advance,
        TurnAdvance::Next {
            unit: UnitId(3),
            team: Team::Enemy,
        }
    );
    assert!(battle
        .turn_order()
        .iter()
        .all(|id| battle.unit(id).is_some_and(|unit| unit.hp() > 0)));
}

#[test]
fn defeat_when_last_player_falls() {
    let scout = UnitSpec::new(UnitId(1), "scout", Team::Player, GOBLIN, pos(1, 1));
    let mut battle = started(GridModel::new(5, 5), vec![scout, brute(2, pos(2, 1))]);

    battle.end_turn().unwrap();
    let report = battle.try_attack(UnitId(2), UnitId(1)).unwrap();

    assert!(report.defender_died);
    assert_eq!(battle.state(), BattleState::Defeat);
    assert_eq!(battle.outcome(), Some(BattleOutcome::Defeat));
    assert_eq!(battle.active_unit(), None);
}

#[test]
fn deployment_only_moves_player_units() {
    let mut battle = deployed(
        GridModel::new(5, 5),
        vec![fighter(1, pos(1, 1)), brute(2, pos(2, 1))],
    );

    battle.deploy(UnitId(1), pos(0, 4)).unwrap();
    assert_eq!(battle.grid().occupant_at(pos(0, 4)), Some(UnitId(1)));
    assert_eq!(battle.grid().occupant_at(pos(1, 1)), None);

    assert_eq!(
        battle.deploy(UnitId(2), pos(3, 3)),
        Err(CommandError::NotDeployable(UnitId(2)))
    );
    assert_eq!(
        battle.deploy(UnitId(1), pos(2, 1)),
        Err(CommandError::Placement(PlacementError::Occupied {
            position: pos(2, 1),
            occupant: UnitId(2),
        }))
    );
    assert_eq!(battle.unit(UnitId(1)).unwrap().position(), pos(0, 4));

    battle.start_battle().unwrap();
    assert_eq!(
        battle.deploy(UnitId(1), pos(0, 3)),
        Err(CommandError::InvalidPhase {
            command: CommandKind::Deploy,
            state: BattleState::PlayerTurn,
        })
    );
}

#[test]
fn initialize_rejects_bad_rosters() {
    let grid = GridModel::from_ascii(&["...", ".#.", "..."]).unwrap();
    let mut battle = Battle::builder().grid(grid).tables(tables()).build().unwrap();

    assert_eq!(battle.initialize(Vec::new()), Err(CommandError::EmptyRoster));
    assert_eq!(
        battle.initialize(vec![fighter(1, pos(0, 0)), brute(1, pos(2, 2))]),
        Err(CommandError::DuplicateUnit(UnitId(1)))
    );
    assert_eq!(
        battle.initialize(vec![fighter(1, pos(0, 0)), brute(2, pos(1, 1))]),
        Err(CommandError::Placement(PlacementError::NotWalkable {
            position: pos(1, 1),
        }))
    );

    assert_eq!(battle.state(), BattleState::Setup);
    assert!(battle.grid().cells().all(|cell| !cell.is_occupied()));
    assert_eq!(
        battle.end_turn(),
        Err(CommandError::InvalidPhase {
            command: CommandKind::EndTurn,
            state: BattleState::Setup,
        })
    );
}

#[test]
fn initiative_decides_who_opens() {
    let quick = brute(2, pos(3, 3)).with_instance(StatBlock::new(0, 4, 0, 0, 10));
    let mut battle = deployed(GridModel::new(5, 5), vec![fighter(1, pos(0, 0)), quick]);
    battle.drain_events();

    let advance = battle.start_battle().unwrap();

    assert_eq!(
        advance,
        TurnAdvance::Next {
            unit: UnitId(2),
            team: Team::Enemy,
        }
    );
    assert_eq!(battle.turn_order().iter().collect::<Vec<_>>(), vec![UnitId(2), UnitId(1)]);
    let events = battle.drain_events();
    assert!(events.contains(&BattleEvent::StateChanged {
        from: BattleState::Deployment,
        to: BattleState::EnemyTurn,
    }));
    assert!(events.contains(&BattleEvent::TurnStarted {
        unit: UnitId(2),
        team: Team::Enemy,
        turn: 1,
    }));
}

#[test]
fn snapshot_reflects_the_board() {
    let battle = started(
        GridModel::new(5, 5),
        vec![fighter(1, pos(1, 1)), brute(2, pos(2, 1))],
    );

    let snapshot = battle.snapshot();

    assert_eq!(snapshot.state, BattleState::PlayerTurn);
    assert_eq!(snapshot.active, Some(UnitId(1)));
    assert_eq!(snapshot.turn, 1);
    assert_eq!(snapshot.turn_order, vec![UnitId(1), UnitId(2)]);
    assert_eq!(snapshot.units.len(), 2);
    assert_eq!(snapshot.units[1].hp, 20);
}

#[test]
fn same_seed_replays_identically() {
    fn run(seed: u64) -> Vec<BattleEvent> {
        let mut battle = Battle::builder()
            .grid(GridModel::new(5, 5))
            .tables(tables())
            .seed(seed)
            .build()
            .unwrap();
        battle
            .initialize(vec![fighter(1, pos(1, 1)), fighter(3, pos(0, 0)), brute(2, pos(2, 1))])
            .unwrap();
        battle.start_battle().unwrap();
        for _ in 0..6 {
            if let Some(active) = battle.active_unit() {
                if battle.unit(active).is_some_and(|unit| unit.team() == Team::Player) {
                    let _ = battle.try_attack(active, UnitId(2));
                }
            }
            let _ = battle.end_turn();
        }
        battle.drain_events()
    }

    assert_eq!(run(42), run(42));
}
