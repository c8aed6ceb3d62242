//! Resource pools (HP, MP, AP, spell slots).
//!
//! Maximum values are derived; current values are unit state.
//! Invariant for every pool: `0 <= current <= maximum`.

/// Pool selector used by costs and effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PoolKind {
    Hp,
    /// Movement points.
    Mp,
    /// Action points.
    Ap,
    SpellSlots,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    current: u32,
    maximum: u32,
}

impl ResourcePool {
    /// Pool starting full.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Spends `amount` if available. Returns `false` without mutation otherwise.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if amount > self.current {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Adds `amount`, clamped to the maximum. Returns the amount actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - before
    }

    /// Removes up to `amount`, stopping at zero. Returns the amount removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }

    pub fn empty(&mut self) {
        self.current = 0;
    }

    /// Changes the maximum, clamping the current value into range.
    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }
}

/// All pools of one unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePools {
    pub hp: ResourcePool,
    pub mp: ResourcePool,
    pub ap: ResourcePool,
    pub spell_slots: ResourcePool,
}

impl ResourcePools {
    pub fn get(&self, kind: PoolKind) -> &ResourcePool {
        match kind {
            PoolKind::Hp => &self.hp,
            PoolKind::Mp => &self.mp,
            PoolKind::Ap => &self.ap,
            PoolKind::SpellSlots => &self.spell_slots,
        }
    }

    pub fn get_mut(&mut self, kind: PoolKind) -> &mut ResourcePool {
        match kind {
            PoolKind::Hp => &mut self.hp,
            PoolKind::Mp => &mut self.mp,
            PoolKind::Ap => &mut self.ap,
            PoolKind::SpellSlots => &mut self.spell_slots,
        }
    }
}
