//! Damage formulas.

use crate::config::CombatTuning;

/// Attack value after an optional critical multiplier.
///
/// ```text
/// effective_attack = crit ? round(attack_power × crit_multiplier) : attack_power
/// ```
pub fn effective_attack(attack_power: i32, critical: bool, tuning: &CombatTuning) -> i32 {
    if critical {
        (attack_power as f32 * tuning.crit_multiplier).round() as i32
    } else {
        attack_power
    }
}

/// Physical damage. A successful hit always deals at least 1.
///
/// ```text
/// damage = max(1, effective_attack - total_defense)
/// ```
pub fn physical_damage(effective_attack: i32, total_defense: i32) -> u32 {
    effective_attack.saturating_sub(total_defense).max(1) as u32
}

/// Spell damage before it is applied to any target.
///
/// ```text
/// damage = base_power + scaling_stat + round(base_power × spell_power_bonus)
/// ```
///
/// Negative totals (heavily debuffed casters) deal nothing.
pub fn spell_damage(base_power: i32, scaling_stat: i32, spell_power_bonus: f32) -> u32 {
    let bonus = (base_power as f32 * spell_power_bonus).round() as i32;
    (base_power + scaling_stat + bonus).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_critical_attack_subtracts_defense() {
        // STR 10 + weapon 5 against defense 3.
        let attack = effective_attack(15, false, &CombatTuning::default());
        assert_eq!(physical_damage(attack, 3), 12);
    }

    #[test]
    fn critical_multiplies_then_rounds() {
        let tuning = CombatTuning::default();
        assert_eq!(effective_attack(15, true, &tuning), 23);
        assert_eq!(effective_attack(10, true, &tuning), 15);
    }

    #[test]
    fn hits_deal_at_least_one() {
        assert_eq!(physical_damage(2, 40), 1);
        assert_eq!(physical_damage(-3, 0), 1);
    }

    #[test]
    fn spell_damage_scales_with_bonus() {
        // 8 base + 12 INT + round(8 × 0.24)
        assert_eq!(spell_damage(8, 12, 0.24), 22);
        assert_eq!(spell_damage(0, -4, 0.0), 0);
    }
}
