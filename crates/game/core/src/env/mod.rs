//! Read-only inputs to a battle: definition tables, roster entries, and the
//! random source.
mod rng;
mod roster;
mod tables;

pub use rng::{PcgRng, RngSource, ScriptedRng};
pub use roster::UnitSpec;
pub use tables::{
    ArmorDef, ArmorId, ClassDef, ClassId, DefinitionOracle, DefinitionTables, EffectPayload,
    RaceDef, RaceId, SpellDef, SpellId, SpellKind, WeaponDef, WeaponId,
};
