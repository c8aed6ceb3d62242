//! Combat resolution.
//!
//! Pure formulas (`hit`, `damage`) plus the resolvers the engine calls for
//! attacks, spells, and effects. Randomness only enters through
//! [`crate::env::RngSource`].

pub mod damage;
pub mod effects;
pub mod hit;
pub mod result;
pub mod spell;

pub use damage::{effective_attack, physical_damage, spell_damage};
pub use effects::{EffectApplication, RejectReason, apply_effect};
pub use hit::{hit_chance, is_critical, is_hit};
pub use result::{AttackOutcome, AttackResolution, resolve_attack};
pub use spell::{SpellHit, SpellReport, SpellTarget, caster_spell_damage, in_blast};
