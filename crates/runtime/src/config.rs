//! Runtime configuration structures and loaders.
use std::env;
use std::time::Duration;

use tactics_core::{BattleConfig, Controller, Controllers};

/// Configuration shared by the runtime orchestrator and its worker.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub pacing: PacingConfig,
    /// Seed for the battle's random source. A random seed is drawn at build
    /// time when unset.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
            pacing: PacingConfig::default(),
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_SEED` - Battle RNG seed (default: random)
    /// - `TACTICS_AI_STEP_DELAY_MS` - Pause between AI sub-steps (default: 250)
    /// - `TACTICS_AUTO_END_DELAY_MS` - Delay before auto-ending a stuck human turn (default: 600)
    /// - `TACTICS_MOVE_STEP_MS` - Animation time per moved cell (default: 120)
    /// - `TACTICS_EVENT_BUFFER` - Per-topic event channel capacity (default: 256)
    /// - `TACTICS_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `TACTICS_PLAYER_CONTROLLER` / `TACTICS_ENEMY_CONTROLLER` - `human` or `ai`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|value| value.trim().to_owned());
        let mut config = Self::default();

        if let Some(seed) = read("TACTICS_SEED").and_then(|value| value.parse().ok()) {
            config.seed = Some(seed);
        }
        if let Some(ms) = read("TACTICS_AI_STEP_DELAY_MS").and_then(|value| value.parse().ok()) {
            config.pacing.ai_step_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read("TACTICS_AUTO_END_DELAY_MS").and_then(|value| value.parse().ok()) {
            config.pacing.auto_end_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read("TACTICS_MOVE_STEP_MS").and_then(|value| value.parse().ok()) {
            config.pacing.move_step = Duration::from_millis(ms);
        }
        if let Some(capacity) = read("TACTICS_EVENT_BUFFER").and_then(|value| value.parse::<usize>().ok()) {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read("TACTICS_COMMAND_BUFFER").and_then(|value| value.parse::<usize>().ok()) {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(controller) = read("TACTICS_PLAYER_CONTROLLER").and_then(|value| parse_controller(&value)) {
            config.battle.controllers.player = controller;
        }
        if let Some(controller) = read("TACTICS_ENEMY_CONTROLLER").and_then(|value| parse_controller(&value)) {
            config.battle.controllers.enemy = controller;
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_controllers(mut self, controllers: Controllers) -> Self {
        self.battle.controllers = controllers;
        self
    }
}

/// Fixed delays that make AI turns and animations watchable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PacingConfig {
    /// Pause before and after each AI decision is executed.
    pub ai_step_delay: Duration,
    /// How long a human unit with nothing left to do keeps its turn.
    pub auto_end_delay: Duration,
    /// Animation time per cell of movement.
    pub move_step: Duration,
}

impl PacingConfig {
    /// No pauses at all; useful for headless simulation.
    pub const fn instant() -> Self {
        Self {
            ai_step_delay: Duration::ZERO,
            auto_end_delay: Duration::ZERO,
            move_step: Duration::ZERO,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            ai_step_delay: Duration::from_millis(250),
            auto_end_delay: Duration::from_millis(600),
            move_step: Duration::from_millis(120),
        }
    }
}

fn parse_controller(value: &str) -> Option<Controller> {
    match value.to_ascii_lowercase().as_str() {
        "human" => Some(Controller::Human),
        "ai" => Some(Controller::Ai),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(config.seed, None);
        assert_eq!(config.pacing, PacingConfig::default());
        assert_eq!(config.command_buffer_size, 32);
    }

    #[test]
    fn reads_every_variable() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("TACTICS_SEED", "99"),
            ("TACTICS_AI_STEP_DELAY_MS", "10"),
            ("TACTICS_AUTO_END_DELAY_MS", " 20 "),
            ("TACTICS_MOVE_STEP_MS", "5"),
            ("TACTICS_EVENT_BUFFER", "0"),
            ("TACTICS_COMMAND_BUFFER", "8"),
            ("TACTICS_PLAYER_CONTROLLER", "AI"),
        ]));

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.pacing.ai_step_delay, Duration::from_millis(10));
        assert_eq!(config.pacing.auto_end_delay, Duration::from_millis(20));
        assert_eq!(config.pacing.move_step, Duration::from_millis(5));
        assert_eq!(config.event_buffer_size, 1);
        assert_eq!(config.command_buffer_size, 8);
        assert_eq!(config.battle.controllers, Controllers::autonomous());
    }

    #[test]
    fn ignores_malformed_values() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("TACTICS_SEED", "soon"),
            ("TACTICS_ENEMY_CONTROLLER", "robot"),
        ]));
        assert_eq!(config.seed, None);
        assert_eq!(config.battle.controllers.enemy, Controller::Ai);
    }
}
