//! Per-unit battle state.

use tracing::warn;

use super::effect::{ActiveEffects, Effect, EffectKind};
use super::{Position, Team, UnitId};
use crate::config::CombatTuning;
use crate::env::{
    ArmorDef, ClassDef, DefinitionOracle, SpellDef, SpellId, UnitSpec, WeaponDef,
};
use crate::stats::{
    BonusChain, BonusLayer, DerivedStats, Loadout, PoolKind, ResourcePool, ResourcePools,
    StatBlock, StatKind,
};

/// A spell known by a unit together with its cooldown counter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnownSpell {
    pub def: SpellDef,
    /// Caster turns until the spell is castable again; 0 means ready.
    pub cooldown: u32,
}

impl KnownSpell {
    pub fn id(&self) -> SpellId {
        self.def.id
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown == 0
    }
}

/// Damage bookkeeping returned by [`UnitActor::take_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageTaken {
    pub applied: u32,
    pub died: bool,
}

/// Runtime state of one unit.
///
/// Invariants: `0 <= hp <= max hp`; pools never go negative; while alive, the
/// grid cell at `position` is occupied by this unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitActor {
    id: UnitId,
    name: String,
    team: Team,
    level: u32,
    class: ClassDef,
    race_hp_bonus: i32,
    weapon: WeaponDef,
    armor: ArmorDef,
    chain: BonusChain,
    pools: ResourcePools,
    effects: ActiveEffects,
    spells: Vec<KnownSpell>,
    position: Position,
    alive: bool,
}

impl UnitActor {
    /// Builds a unit from roster data, resolving definitions.
    ///
    /// Missing definitions degrade instead of failing: an unknown class yields
    /// a zero-stat class, an unknown race contributes nothing, unknown weapons
    /// fall back to the unarmed profile, and unknown spells are skipped.
    pub fn from_spec(spec: &UnitSpec, defs: &dyn DefinitionOracle, tuning: &CombatTuning) -> Self {
        let class = defs.class(spec.class).cloned().unwrap_or_else(|| {
            warn!(unit = %spec.id, class = %spec.class, "missing class definition; using empty class");
            ClassDef::new(spec.class, "unknown")
        });

        let race = spec.race.and_then(|race| {
            let def = defs.race(race);
            if def.is_none() {
                warn!(unit = %spec.id, %race, "missing race definition; ignoring race modifiers");
            }
            def
        });

        let weapon = spec
            .weapon
            .and_then(|weapon| {
                let def = defs.weapon(weapon).cloned();
                if def.is_none() {
                    warn!(unit = %spec.id, %weapon, "missing weapon definition; fighting unarmed");
                }
                def
            })
            .unwrap_or_else(WeaponDef::unarmed);

        let armor = spec
            .armor
            .and_then(|armor| {
                let def = defs.armor(armor).cloned();
                if def.is_none() {
                    warn!(unit = %spec.id, %armor, "missing armor definition; ignoring armor");
                }
                def
            })
            .unwrap_or_else(ArmorDef::none);

        let spells = spec
            .spells
            .iter()
            .filter_map(|spell| match defs.spell(*spell) {
                Some(def) => Some(KnownSpell {
                    def: def.clone(),
                    cooldown: 0,
                }),
                None => {
                    warn!(unit = %spec.id, %spell, "missing spell definition; skipping");
                    None
                }
            })
            .collect();

        let level = spec.level.max(1);
        let mut chain = BonusChain::new();
        chain.set(BonusLayer::ClassBase, class.base);
        chain.set(
            BonusLayer::Race,
            race.map(|race| race.modifiers).unwrap_or(StatBlock::ZERO),
        );
        chain.set(
            BonusLayer::LevelGrowth,
            class.growth.scaled(level as i32 - 1),
        );
        chain.set(BonusLayer::Instance, spec.instance);
        chain.set(BonusLayer::Equipment, weapon.stat_bonus + armor.stat_bonus);

        let mut unit = Self {
            id: spec.id,
            name: spec.name.clone(),
            team: spec.team,
            level,
            class,
            race_hp_bonus: race.map(|race| race.hp_bonus).unwrap_or(0),
            weapon,
            armor,
            chain,
            pools: ResourcePools::default(),
            effects: ActiveEffects::new(),
            spells,
            position: spec.spawn,
            alive: true,
        };

        let derived = unit.derived(tuning);
        unit.pools = ResourcePools {
            hp: ResourcePool::full(derived.max_hp),
            mp: ResourcePool::full(derived.max_mp),
            ap: ResourcePool::full(derived.max_ap),
            spell_slots: ResourcePool::full(derived.max_spell_slots),
        };
        unit
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn weapon(&self) -> &WeaponDef {
        &self.weapon
    }

    pub fn armor(&self) -> &ArmorDef {
        &self.armor
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Updates the stored position. The caller keeps the grid in sync.
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub fn chain(&self) -> &BonusChain {
        &self.chain
    }

    /// Chain totals with active stat buffs/debuffs applied.
    pub fn stat_totals(&self) -> StatBlock {
        self.chain.totals() + self.effects.stat_modifiers()
    }

    pub fn stat_total(&self, stat: StatKind) -> i32 {
        self.stat_totals().get(stat)
    }

    pub fn derived(&self, tuning: &CombatTuning) -> DerivedStats {
        let loadout = Loadout {
            class: &self.class,
            race_hp_bonus: self.race_hp_bonus,
            level: self.level,
            weapon: &self.weapon,
            armor: &self.armor,
        };
        DerivedStats::compute(&self.stat_totals(), &loadout, tuning)
    }

    /// Re-derives pool maxima after stats change. Current values are clamped,
    /// never raised.
    pub fn refresh_maxima(&mut self, tuning: &CombatTuning) {
        let derived = self.derived(tuning);
        self.pools.hp.set_maximum(derived.max_hp);
        self.pools.mp.set_maximum(derived.max_mp);
        self.pools.ap.set_maximum(derived.max_ap);
        self.pools.spell_slots.set_maximum(derived.max_spell_slots);
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub fn pools(&self) -> &ResourcePools {
        &self.pools
    }

    pub fn pool(&self, kind: PoolKind) -> &ResourcePool {
        self.pools.get(kind)
    }

    pub fn hp(&self) -> u32 {
        self.pools.hp.current()
    }

    pub fn max_hp(&self) -> u32 {
        self.pools.hp.maximum()
    }

    pub fn hp_ratio(&self) -> f32 {
        let max = self.max_hp();
        if max == 0 {
            return 0.0;
        }
        self.hp() as f32 / max as f32
    }

    /// Restores MP and AP to their maxima. Spell slots are not restored.
    ///
    /// Stunned units start the turn with zero MP and AP.
    pub fn reset_turn_resources(&mut self, tuning: &CombatTuning) {
        self.refresh_maxima(tuning);
        if self.effects.has(EffectKind::Stun) {
            self.pools.mp.empty();
            self.pools.ap.empty();
        } else {
            self.pools.mp.refill();
            self.pools.ap.refill();
        }
    }

    /// Spends from a pool; fails without mutation if `amount > current`.
    pub fn try_spend(&mut self, pool: PoolKind, amount: u32) -> bool {
        self.pools.get_mut(pool).try_spend(amount)
    }

    /// Adds to a pool, clamped to its maximum. Returns the amount restored.
    pub fn restore(&mut self, pool: PoolKind, amount: u32) -> u32 {
        self.pools.get_mut(pool).restore(amount)
    }

    /// Removes HP; a unit reaching zero dies. Dead units ignore damage.
    pub fn take_damage(&mut self, amount: u32) -> DamageTaken {
        if !self.alive {
            return DamageTaken {
                applied: 0,
                died: false,
            };
        }

        let applied = self.pools.hp.drain(amount);
        let died = self.pools.hp.is_empty();
        if died {
            self.alive = false;
        }
        DamageTaken { applied, died }
    }

    /// Restores HP up to the maximum. Dead units cannot be healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        self.pools.hp.restore(amount)
    }

    // ========================================================================
    // Effects
    // ========================================================================

    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    pub(crate) fn effects_mut(&mut self) -> &mut ActiveEffects {
        &mut self.effects
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.has(kind)
    }

    // ========================================================================
    // Spells
    // ========================================================================

    pub fn spells(&self) -> &[KnownSpell] {
        &self.spells
    }

    pub fn spell(&self, id: SpellId) -> Option<&KnownSpell> {
        self.spells.iter().find(|spell| spell.id() == id)
    }

    /// Resource and cooldown check only; targeting is validated separately.
    pub fn can_afford(&self, spell: &KnownSpell) -> bool {
        spell.is_ready()
            && self.pools.ap.current() >= spell.def.ap_cost
            && self.pools.spell_slots.current() >= spell.def.slot_cost
    }

    /// Starts the cooldown of a spell after a successful cast.
    pub(crate) fn start_cooldown(&mut self, id: SpellId) {
        if let Some(spell) = self.spells.iter_mut().find(|spell| spell.id() == id) {
            spell.cooldown = spell.def.cooldown;
        }
    }

    /// Decrements every cooldown by one; called at the start of the unit's turn.
    pub(crate) fn tick_cooldowns(&mut self) {
        for spell in &mut self.spells {
            spell.cooldown = spell.cooldown.saturating_sub(1);
        }
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    pub fn snapshot(&self, tuning: &CombatTuning) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            name: self.name.clone(),
            team: self.team,
            hp: self.hp(),
            max_hp: self.max_hp(),
            mp: self.pools.mp.current(),
            ap: self.pools.ap.current(),
            spell_slots: self.pools.spell_slots.current(),
            position: self.position,
            alive: self.alive,
            derived: self.derived(tuning),
            effects: self.effects.iter().copied().collect(),
        }
    }
}

/// Read-only view of a unit for events and presentation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub name: String,
    pub team: Team,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub ap: u32,
    pub spell_slots: u32,
    pub position: Position,
    pub alive: bool,
    pub derived: DerivedStats,
    pub effects: Vec<Effect>,
}
