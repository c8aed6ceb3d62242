//! Stat system.
//!
//! ```text
//! [ Attribute layers (BonusChain) ]
//!      ↓  + active buffs/debuffs
//! [ Attribute totals (StatBlock) ]
//!      ↓  + weapon / armor / class
//! [ DerivedStats ]
//!      ↓
//! [ Pool maxima (ResourcePools) ]
//! ```
//!
//! Only the layers and current pool values are stored; everything else is
//! recomputed from them.

pub mod bonus;
pub mod core;
pub mod derived;
pub mod resources;

pub use bonus::{BonusChain, BonusLayer};
pub use self::core::{StatBlock, StatKind};
pub use derived::{DerivedStats, Loadout};
pub use resources::{PoolKind, ResourcePool, ResourcePools};
