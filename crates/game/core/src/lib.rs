//! Deterministic rules for a turn-based grid tactics battle.
//!
//! `tactics-core` owns the board ([`GridModel`]), unit stats and resources
//! ([`UnitActor`]), reach and sight queries ([`targeting`]), combat
//! resolution ([`combat`]), and the battle state machine ([`Battle`]). It is
//! synchronous and never touches clocks or I/O; randomness comes from an
//! injected [`RngSource`]. All state mutation flows through [`Battle`], which
//! buffers [`BattleEvent`]s for the runtime to publish.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;
pub mod targeting;
pub use combat::{
    AttackOutcome, AttackResolution, EffectApplication, RejectReason, SpellHit, SpellReport,
    SpellTarget,
};
pub use config::{BattleConfig, CombatTuning, Controller, Controllers};
pub use engine::{
    AttackReport, Battle, BattleBuilder, BattleEvent, BattleOutcome, BattleSnapshot, BattleState,
    CommandError, CommandKind, EventCategory, InitError, MoveOutcome, TurnAdvance,
};
pub use env::{
    ArmorDef, ArmorId, ClassDef, ClassId, DefinitionOracle, DefinitionTables, EffectPayload,
    PcgRng, RaceDef, RaceId, RngSource, ScriptedRng, SpellDef, SpellId, SpellKind, UnitSpec,
    WeaponDef, WeaponId,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ActiveEffects, Effect, EffectKind, GridCell, GridModel, PlacementError, Position, Team,
    TerrainKind, TurnOrder, UnitActor, UnitId, UnitSnapshot,
};
pub use stats::{DerivedStats, PoolKind, StatBlock, StatKind};
pub use targeting::MovementRange;
