//! Basic attack resolution.

use tracing::trace;

use super::damage::{effective_attack, physical_damage};
use super::hit::{hit_chance, is_critical, is_hit};
use crate::config::CombatTuning;
use crate::env::RngSource;
use crate::stats::DerivedStats;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    Miss,
    Hit,
    Critical,
    /// The defender was already dead; nothing happened.
    TargetDown,
}

impl AttackOutcome {
    pub fn landed(self) -> bool {
        matches!(self, AttackOutcome::Hit | AttackOutcome::Critical)
    }
}

/// Rolls and damage of one resolved attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResolution {
    pub outcome: AttackOutcome,
    pub hit_chance: f32,
    pub hit_roll: f32,
    /// Absent on a miss: no further rolls are drawn.
    pub crit_roll: Option<f32>,
    /// Zero on a miss.
    pub damage: u32,
}

/// Resolves one basic attack.
///
/// 1. `hit_chance = clamp(accuracy − dodge, min, max)`; a roll above it misses.
/// 2. An independent roll against the attacker's crit chance.
/// 3. `damage = max(1, effective_attack − total_defense)`.
pub fn resolve_attack(
    attacker: &DerivedStats,
    defender: &DerivedStats,
    rng: &mut dyn RngSource,
    tuning: &CombatTuning,
) -> AttackResolution {
    let chance = hit_chance(attacker.accuracy, defender.dodge, tuning);
    let hit_roll = rng.next_unit();

    if !is_hit(hit_roll, chance) {
        trace!(target: "tactics::combat", chance, hit_roll, "attack missed");
        return AttackResolution {
            outcome: AttackOutcome::Miss,
            hit_chance: chance,
            hit_roll,
            crit_roll: None,
            damage: 0,
        };
    }

    let crit_roll = rng.next_unit();
    let critical = is_critical(crit_roll, attacker.crit_chance);
    let attack = effective_attack(attacker.attack_power, critical, tuning);
    let damage = physical_damage(attack, defender.total_defense);

    trace!(
        target: "tactics::combat",
        chance,
        hit_roll,
        crit_roll,
        critical,
        attack,
        defense = defender.total_defense,
        damage,
        "attack landed"
    );

    AttackResolution {
        outcome: if critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        },
        hit_chance: chance,
        hit_roll,
        crit_roll: Some(crit_roll),
        damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ArmorDef, ClassDef, ClassId, ScriptedRng, WeaponDef, WeaponId};
    use crate::stats::{Loadout, StatBlock};

    fn derived(totals: StatBlock, weapon_power: i32, armor_defense: i32) -> DerivedStats {
        let class = ClassDef::new(ClassId(1), "test");
        let weapon = WeaponDef::new(WeaponId(1), "test", weapon_power, 1);
        let armor = ArmorDef {
            defense: armor_defense,
            ..ArmorDef::none()
        };
        DerivedStats::compute(
            &totals,
            &Loadout {
                class: &class,
                race_hp_bonus: 0,
                level: 1,
                weapon: &weapon,
                armor: &armor,
            },
            &CombatTuning::default(),
        )
    }

    #[test]
    fn miss_draws_a_single_roll() {
        let attacker = derived(StatBlock::new(10, 0, 0, 0, 0), 5, 0);
        let defender = derived(StatBlock::ZERO, 0, 3);
        let mut rng = ScriptedRng::new([0.95, 0.0]);

        let result = resolve_attack(&attacker, &defender, &mut rng, &CombatTuning::default());

        assert_eq!(result.outcome, AttackOutcome::Miss);
        assert_eq!(result.damage, 0);
        assert_eq!(result.crit_roll, None);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn plain_hit_matches_formula() {
        let attacker = derived(StatBlock::new(10, 0, 0, 0, 0), 5, 0);
        let defender = derived(StatBlock::ZERO, 0, 3);
        let mut rng = ScriptedRng::new([0.1, 0.9]);

        let result = resolve_attack(&attacker, &defender, &mut rng, &CombatTuning::default());

        assert_eq!(result.outcome, AttackOutcome::Hit);
        assert_eq!(result.damage, 12);
    }

    #[test]
    fn critical_hit_uses_multiplier() {
        let attacker = derived(StatBlock::new(10, 0, 0, 0, 0), 5, 0);
        let defender = derived(StatBlock::ZERO, 0, 3);
        let mut rng = ScriptedRng::new([0.1, 0.01]);

        let result = resolve_attack(&attacker, &defender, &mut rng, &CombatTuning::default());

        assert_eq!(result.outcome, AttackOutcome::Critical);
        // round(15 × 1.5) − 3
        assert_eq!(result.damage, 20);
    }

    #[test]
    fn armored_defender_still_takes_one() {
        let attacker = derived(StatBlock::new(1, 0, 0, 0, 0), 0, 0);
        let defender = derived(StatBlock::new(0, 0, 0, 10, 0), 0, 10);
        let mut rng = ScriptedRng::new([0.0, 0.99]);

        let result = resolve_attack(&attacker, &defender, &mut rng, &CombatTuning::default());
        assert_eq!(result.damage, 1);
    }
}
