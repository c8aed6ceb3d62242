//! Derived combat stats computed from attribute totals and equipment.
//!
//! Never stored. Recomputed whenever a unit's attributes or effects change.

use super::core::StatBlock;
use crate::config::CombatTuning;
use crate::env::{ArmorDef, ClassDef, WeaponDef};

/// Static inputs besides attribute totals.
#[derive(Clone, Copy, Debug)]
pub struct Loadout<'a> {
    pub class: &'a ClassDef,
    pub race_hp_bonus: i32,
    pub level: u32,
    pub weapon: &'a WeaponDef,
    pub armor: &'a ArmorDef,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    /// STR + weapon power.
    pub attack_power: i32,
    /// DEF + armor defense.
    pub total_defense: i32,
    pub accuracy: f32,
    pub dodge: f32,
    pub crit_chance: f32,
    pub magic_resist: f32,
    pub spell_power_bonus: f32,
    /// SPD + DEX / 2, used once to build turn order.
    pub initiative: f32,
    pub attack_range: u32,
    pub max_hp: u32,
    pub max_mp: u32,
    pub max_ap: u32,
    pub max_spell_slots: u32,
}

impl DerivedStats {
    pub fn compute(totals: &StatBlock, loadout: &Loadout<'_>, tuning: &CombatTuning) -> Self {
        let Loadout {
            class,
            race_hp_bonus,
            level,
            weapon,
            armor,
        } = *loadout;

        let dex = totals.dexterity as f32;
        let int = totals.intelligence as f32;
        let def = totals.defense as f32;
        let spd = totals.speed as f32;

        let magic_resist = (tuning.resist_per_int * int
            + tuning.resist_per_def * def
            + armor.magic_resist)
            .min(tuning.max_magic_resist);

        Self {
            attack_power: totals.strength + weapon.power,
            total_defense: totals.defense + armor.defense,
            accuracy: tuning.base_accuracy + tuning.accuracy_per_dex * dex + weapon.accuracy_bonus,
            dodge: tuning.dodge_per_speed * spd + tuning.dodge_per_dex * dex,
            crit_chance: tuning.base_crit + tuning.crit_per_dex * dex + weapon.crit_bonus,
            magic_resist,
            spell_power_bonus: tuning.spell_power_per_int * int,
            initiative: spd + dex / 2.0,
            attack_range: weapon.range,
            max_hp: Self::max_hp(class, race_hp_bonus, level, armor),
            max_mp: Self::max_mp(class, totals.speed, tuning),
            max_ap: class.action_points,
            max_spell_slots: class.spell_slots,
        }
    }

    /// `class base + race + (level - 1) × growth + armor`, at least 1.
    fn max_hp(class: &ClassDef, race_hp_bonus: i32, level: u32, armor: &ArmorDef) -> u32 {
        let growth = i64::from(level.saturating_sub(1)) * i64::from(class.hp_growth);
        let total = i64::from(class.base_hp) + i64::from(race_hp_bonus) + growth + i64::from(armor.hp_bonus);
        total.clamp(1, i64::from(u32::MAX)) as u32
    }

    /// `class movement + SPD / speed_per_movement_point`, never negative.
    fn max_mp(class: &ClassDef, speed: i32, tuning: &CombatTuning) -> u32 {
        let per_point = tuning.speed_per_movement_point.max(1);
        let total = class.movement as i32 + speed / per_point;
        total.max(0) as u32
    }
}
