use crate::state::Team;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Coefficients feeding the derived-stat and combat formulas.
    pub tuning: CombatTuning,

    /// Action points consumed by a basic weapon attack.
    pub attack_ap_cost: u32,

    /// Who issues commands for each team. The core only records this; the
    /// runtime decides whether to wait for input or run the AI.
    pub controllers: Controllers,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Upper bound on simultaneously active effects per unit. Effects refresh
    /// per kind, so this only needs to cover the number of distinct kinds.
    pub const MAX_ACTIVE_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_AP_COST: u32 = 1;

    pub fn new() -> Self {
        Self {
            tuning: CombatTuning::default(),
            attack_ap_cost: Self::DEFAULT_ATTACK_AP_COST,
            controllers: Controllers::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: CombatTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_controllers(mut self, controllers: Controllers) -> Self {
        self.controllers = controllers;
        self
    }
}

/// Source of commands for a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Controller {
    #[default]
    Human,
    Ai,
}

/// Per-team controller assignment. Defaults to a human player against AI
/// enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Controllers {
    pub player: Controller,
    pub enemy: Controller,
}

impl Controllers {
    pub const fn new(player: Controller, enemy: Controller) -> Self {
        Self { player, enemy }
    }

    /// Both sides played by the AI.
    pub const fn autonomous() -> Self {
        Self::new(Controller::Ai, Controller::Ai)
    }

    pub const fn for_team(&self, team: Team) -> Controller {
        match team {
            Team::Player => self.player,
            Team::Enemy => self.enemy,
        }
    }
}

impl Default for Controllers {
    fn default() -> Self {
        Self::new(Controller::Human, Controller::Ai)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Coefficients for the derived-stat chain and hit/crit formulas.
///
/// ```text
/// accuracy     = base_accuracy + accuracy_per_dex × DEX + weapon accuracy
/// dodge        = dodge_per_speed × SPD + dodge_per_dex × DEX
/// crit         = base_crit + crit_per_dex × DEX + weapon crit
/// magic resist = min(resist_per_int × INT + resist_per_def × DEF + armor resist, max_magic_resist)
/// spell bonus  = spell_power_per_int × INT
/// max MP       = class movement + SPD / speed_per_movement_point
/// hit chance   = clamp(accuracy − dodge, min_hit_chance, max_hit_chance)
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTuning {
    pub min_hit_chance: f32,
    pub max_hit_chance: f32,
    pub crit_multiplier: f32,
    pub base_accuracy: f32,
    pub accuracy_per_dex: f32,
    pub dodge_per_speed: f32,
    pub dodge_per_dex: f32,
    pub base_crit: f32,
    pub crit_per_dex: f32,
    pub resist_per_int: f32,
    pub resist_per_def: f32,
    pub max_magic_resist: f32,
    pub spell_power_per_int: f32,
    pub speed_per_movement_point: i32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            min_hit_chance: 0.05,
            max_hit_chance: 0.99,
            crit_multiplier: 1.5,
            base_accuracy: 0.80,
            accuracy_per_dex: 0.01,
            dodge_per_speed: 0.02,
            dodge_per_dex: 0.005,
            base_crit: 0.05,
            crit_per_dex: 0.005,
            resist_per_int: 0.01,
            resist_per_def: 0.005,
            max_magic_resist: 0.75,
            spell_power_per_int: 0.02,
            speed_per_movement_point: 5,
        }
    }
}
