//! Battle state owned by the engine: grid, units, effects, and turn order.
mod common;
mod effect;
mod grid;
mod turn;
mod unit;

pub use common::{Position, Team, UnitId};
pub use effect::{ActiveEffects, Effect, EffectKind, EffectSlot};
pub use grid::{GridCell, GridModel, HazardKind, LayoutError, PlacementError, TerrainKind};
pub use turn::{InitiativeRoll, TurnOrder};
pub use unit::{DamageTaken, KnownSpell, UnitActor, UnitSnapshot};
