//! Read-only definition tables for classes, races, equipment, and spells.
//!
//! The engine never loads data itself; callers hand it a [`DefinitionOracle`]
//! (usually [`DefinitionTables`]) and the unit roster references entries by id.

use std::collections::BTreeMap;
use std::fmt;

use crate::state::EffectKind;
use crate::stats::{StatBlock, StatKind};

macro_rules! definition_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

definition_id!(
    /// Reference to a [`ClassDef`].
    ClassId,
    "class"
);
definition_id!(
    /// Reference to a [`RaceDef`].
    RaceId,
    "race"
);
definition_id!(
    /// Reference to a [`WeaponDef`].
    WeaponId,
    "weapon"
);
definition_id!(
    /// Reference to an [`ArmorDef`].
    ArmorId,
    "armor"
);
definition_id!(
    /// Reference to a [`SpellDef`].
    SpellId,
    "spell"
);

/// Class template: base attributes, growth, and pool sizes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDef {
    pub id: ClassId,
    pub name: String,
    pub base: StatBlock,
    /// Attribute gain per level above 1.
    pub growth: StatBlock,
    pub base_hp: u32,
    pub hp_growth: u32,
    /// Movement points before the speed bonus.
    pub movement: u32,
    pub action_points: u32,
    pub spell_slots: u32,
}

impl ClassDef {
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            base: StatBlock::ZERO,
            growth: StatBlock::ZERO,
            base_hp: 1,
            hp_growth: 0,
            movement: 0,
            action_points: 0,
            spell_slots: 0,
        }
    }

    pub fn with_base(mut self, base: StatBlock) -> Self {
        self.base = base;
        self
    }

    pub fn with_growth(mut self, growth: StatBlock) -> Self {
        self.growth = growth;
        self
    }

    pub fn with_hp(mut self, base_hp: u32, hp_growth: u32) -> Self {
        self.base_hp = base_hp;
        self.hp_growth = hp_growth;
        self
    }

    pub fn with_pools(mut self, movement: u32, action_points: u32, spell_slots: u32) -> Self {
        self.movement = movement;
        self.action_points = action_points;
        self.spell_slots = spell_slots;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceDef {
    pub id: RaceId,
    pub name: String,
    pub modifiers: StatBlock,
    pub hp_bonus: i32,
}

impl RaceDef {
    pub fn new(id: RaceId, name: impl Into<String>, modifiers: StatBlock, hp_bonus: i32) -> Self {
        Self {
            id,
            name: name.into(),
            modifiers,
            hp_bonus,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDef {
    pub id: WeaponId,
    pub name: String,
    pub power: i32,
    /// Manhattan attack range.
    pub range: u32,
    pub accuracy_bonus: f32,
    pub crit_bonus: f32,
    pub requires_los: bool,
    pub stat_bonus: StatBlock,
}

impl WeaponDef {
    pub const UNARMED_ID: WeaponId = WeaponId(0);

    /// Profile used when a unit has no weapon or references a missing one.
    pub fn unarmed() -> Self {
        Self {
            id: Self::UNARMED_ID,
            name: "unarmed".to_owned(),
            power: 0,
            range: 1,
            accuracy_bonus: 0.0,
            crit_bonus: 0.0,
            requires_los: false,
            stat_bonus: StatBlock::ZERO,
        }
    }

    pub fn new(id: WeaponId, name: impl Into<String>, power: i32, range: u32) -> Self {
        Self {
            id,
            name: name.into(),
            power,
            range,
            ..Self::unarmed()
        }
    }

    pub fn with_accuracy(mut self, bonus: f32) -> Self {
        self.accuracy_bonus = bonus;
        self
    }

    pub fn with_crit(mut self, bonus: f32) -> Self {
        self.crit_bonus = bonus;
        self
    }

    pub fn with_line_of_sight(mut self, requires_los: bool) -> Self {
        self.requires_los = requires_los;
        self
    }

    pub fn with_stat_bonus(mut self, bonus: StatBlock) -> Self {
        self.stat_bonus = bonus;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorDef {
    pub id: ArmorId,
    pub name: String,
    pub defense: i32,
    pub magic_resist: f32,
    pub hp_bonus: u32,
    pub stat_bonus: StatBlock,
}

impl ArmorDef {
    pub const NONE_ID: ArmorId = ArmorId(0);

    /// Profile used when a unit wears nothing or references a missing armor.
    pub fn none() -> Self {
        Self {
            id: Self::NONE_ID,
            name: "none".to_owned(),
            defense: 0,
            magic_resist: 0.0,
            hp_bonus: 0,
            stat_bonus: StatBlock::ZERO,
        }
    }

    pub fn new(id: ArmorId, name: impl Into<String>, defense: i32) -> Self {
        Self {
            id,
            name: name.into(),
            defense,
            ..Self::none()
        }
    }

    pub fn with_magic_resist(mut self, resist: f32) -> Self {
        self.magic_resist = resist;
        self
    }

    pub fn with_hp_bonus(mut self, hp_bonus: u32) -> Self {
        self.hp_bonus = hp_bonus;
        self
    }

    pub fn with_stat_bonus(mut self, bonus: StatBlock) -> Self {
        self.stat_bonus = bonus;
        self
    }
}

/// Spell behavior family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SpellKind {
    /// Damages one enemy unit.
    SingleDamage,
    /// Damages every enemy within `aoe_radius` of a target cell.
    AreaDamage,
    /// Applies effects to an allied unit (self included).
    Buff,
    /// Applies effects to an enemy unit.
    Debuff,
}

impl SpellKind {
    /// Whether the spell targets allies rather than enemies.
    pub const fn targets_allies(self) -> bool {
        matches!(self, SpellKind::Buff)
    }

    /// Whether the spell targets a cell rather than a unit.
    pub const fn targets_cell(self) -> bool {
        matches!(self, SpellKind::AreaDamage)
    }
}

/// Effect carried by a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectPayload {
    pub kind: EffectKind,
    pub magnitude: i32,
    pub duration: u32,
}

impl EffectPayload {
    pub const fn new(kind: EffectKind, magnitude: i32, duration: u32) -> Self {
        Self {
            kind,
            magnitude,
            duration,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDef {
    pub id: SpellId,
    pub name: String,
    pub kind: SpellKind,
    pub base_power: i32,
    pub scaling: StatKind,
    pub range: u32,
    pub ap_cost: u32,
    pub slot_cost: u32,
    /// Caster turns before the spell can be cast again.
    pub cooldown: u32,
    pub aoe_radius: Option<u32>,
    pub primary: Option<EffectPayload>,
    /// Skipped by immune targets when it is a debuff kind.
    pub secondary: Option<EffectPayload>,
    pub requires_los: bool,
}

impl SpellDef {
    pub fn new(id: SpellId, name: impl Into<String>, kind: SpellKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            base_power: 0,
            scaling: StatKind::Intelligence,
            range: 1,
            ap_cost: 1,
            slot_cost: 0,
            cooldown: 0,
            aoe_radius: None,
            primary: None,
            secondary: None,
            requires_los: false,
        }
    }

    pub fn with_power(mut self, base_power: i32, scaling: StatKind) -> Self {
        self.base_power = base_power;
        self.scaling = scaling;
        self
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn with_costs(mut self, ap_cost: u32, slot_cost: u32) -> Self {
        self.ap_cost = ap_cost;
        self.slot_cost = slot_cost;
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_aoe_radius(mut self, radius: u32) -> Self {
        self.aoe_radius = Some(radius);
        self
    }

    pub fn with_primary(mut self, payload: EffectPayload) -> Self {
        self.primary = Some(payload);
        self
    }

    pub fn with_secondary(mut self, payload: EffectPayload) -> Self {
        self.secondary = Some(payload);
        self
    }

    pub fn with_line_of_sight(mut self, requires_los: bool) -> Self {
        self.requires_los = requires_los;
        self
    }

    /// Radius around the target cell; single-target spells report 0.
    pub fn radius(&self) -> u32 {
        self.aoe_radius.unwrap_or(0)
    }
}

/// Lookup interface for unit definitions.
pub trait DefinitionOracle: Send + Sync {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;
    fn race(&self, id: RaceId) -> Option<&RaceDef>;
    fn weapon(&self, id: WeaponId) -> Option<&WeaponDef>;
    fn armor(&self, id: ArmorId) -> Option<&ArmorDef>;
    fn spell(&self, id: SpellId) -> Option<&SpellDef>;
}

/// In-memory [`DefinitionOracle`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefinitionTables {
    classes: BTreeMap<ClassId, ClassDef>,
    races: BTreeMap<RaceId, RaceDef>,
    weapons: BTreeMap<WeaponId, WeaponDef>,
    armors: BTreeMap<ArmorId, ArmorDef>,
    spells: BTreeMap<SpellId, SpellDef>,
}

impl DefinitionTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, def: ClassDef) -> Self {
        self.classes.insert(def.id, def);
        self
    }

    pub fn with_race(mut self, def: RaceDef) -> Self {
        self.races.insert(def.id, def);
        self
    }

    pub fn with_weapon(mut self, def: WeaponDef) -> Self {
        self.weapons.insert(def.id, def);
        self
    }

    pub fn with_armor(mut self, def: ArmorDef) -> Self {
        self.armors.insert(def.id, def);
        self
    }

    pub fn with_spell(mut self, def: SpellDef) -> Self {
        self.spells.insert(def.id, def);
        self
    }
}

impl DefinitionOracle for DefinitionTables {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(&id)
    }

    fn race(&self, id: RaceId) -> Option<&RaceDef> {
        self.races.get(&id)
    }

    fn weapon(&self, id: WeaponId) -> Option<&WeaponDef> {
        self.weapons.get(&id)
    }

    fn armor(&self, id: ArmorId) -> Option<&ArmorDef> {
        self.armors.get(&id)
    }

    fn spell(&self, id: SpellId) -> Option<&SpellDef> {
        self.spells.get(&id)
    }
}
