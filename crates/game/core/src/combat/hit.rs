//! Hit and critical chance.

use crate::config::CombatTuning;

/// Chance that an attack connects.
///
/// # Formula
///
/// ```text
/// hit_chance = clamp(accuracy - dodge, min_hit_chance, max_hit_chance)
/// ```
pub fn hit_chance(accuracy: f32, dodge: f32, tuning: &CombatTuning) -> f32 {
    (accuracy - dodge).clamp(tuning.min_hit_chance, tuning.max_hit_chance)
}

/// A uniform roll in `[0, 1)` hits unless it exceeds the chance.
pub fn is_hit(roll: f32, chance: f32) -> bool {
    roll <= chance
}

/// A uniform roll in `[0, 1)` crits when it falls below the crit chance.
pub fn is_critical(roll: f32, crit_chance: f32) -> bool {
    roll < crit_chance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chance_is_clamped_to_bounds() {
        let tuning = CombatTuning::default();
        assert_eq!(hit_chance(3.0, 0.0, &tuning), 0.99);
        assert_eq!(hit_chance(0.1, 2.0, &tuning), 0.05);
        assert!((hit_chance(0.9, 0.25, &tuning) - 0.65).abs() < 1e-6);
    }

    #[test]
    fn chance_bounds_hold_for_any_inputs() {
        let tuning = CombatTuning::default();
        for accuracy in [-5.0f32, 0.0, 0.3, 0.8, 1.2, 10.0] {
            for dodge in [-1.0f32, 0.0, 0.2, 0.9, 4.0] {
                let chance = hit_chance(accuracy, dodge, &tuning);
                assert!((0.05..=0.99).contains(&chance), "{accuracy} vs {dodge} -> {chance}");
            }
        }
    }

    #[test]
    fn roll_above_chance_misses() {
        assert!(is_hit(0.5, 0.5));
        assert!(!is_hit(0.51, 0.5));
        assert!(is_critical(0.04, 0.05));
        assert!(!is_critical(0.05, 0.05));
    }
}
