//! Additive bonus chain for unit attributes.
//!
//! Totals are computed by summing layers in a fixed order:
//! `ClassBase → Race → LevelGrowth → Instance → Equipment`.
//!
//! Active stat buffs/debuffs are not part of the chain; they are folded in by
//! [`crate::UnitActor::stat_totals`] after the chain total is known.

use super::core::{StatBlock, StatKind};

/// One layer of the bonus chain, in application order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BonusLayer {
    /// Class base attributes.
    ClassBase,
    /// Race modifier (zero when the race definition is missing).
    Race,
    /// `(level - 1) × class growth`.
    LevelGrowth,
    /// Per-instance flat modifier (quality variance rolled by the roster).
    Instance,
    /// Stat bonuses granted by equipped weapon and armor.
    Equipment,
}

impl BonusLayer {
    pub const ORDER: [BonusLayer; 5] = [
        BonusLayer::ClassBase,
        BonusLayer::Race,
        BonusLayer::LevelGrowth,
        BonusLayer::Instance,
        BonusLayer::Equipment,
    ];

    const fn index(self) -> usize {
        match self {
            BonusLayer::ClassBase => 0,
            BonusLayer::Race => 1,
            BonusLayer::LevelGrowth => 2,
            BonusLayer::Instance => 3,
            BonusLayer::Equipment => 4,
        }
    }
}

/// Stored layers of a unit's attribute chain.
///
/// # Example
/// ```
/// # use tactics_core::stats::{BonusChain, BonusLayer, StatBlock, StatKind};
/// let mut chain = BonusChain::new();
/// chain.set(BonusLayer::ClassBase, StatBlock::new(10, 5, 2, 3, 6));
/// chain.set(BonusLayer::Equipment, StatBlock::single(StatKind::Strength, 2));
/// assert_eq!(chain.total(StatKind::Strength), 12);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusChain {
    layers: [StatBlock; 5],
}

impl BonusChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a layer.
    pub fn set(&mut self, layer: BonusLayer, block: StatBlock) {
        self.layers[layer.index()] = block;
    }

    pub fn layer(&self, layer: BonusLayer) -> &StatBlock {
        &self.layers[layer.index()]
    }

    /// Sum of all layers in chain order.
    pub fn totals(&self) -> StatBlock {
        BonusLayer::ORDER
            .iter()
            .fold(StatBlock::ZERO, |acc, layer| acc + *self.layer(*layer))
    }

    pub fn total(&self, kind: StatKind) -> i32 {
        self.layers.iter().map(|block| block.get(kind)).sum()
    }

    /// Per-layer contributions for one attribute, in chain order.
    pub fn breakdown(&self, kind: StatKind) -> [(BonusLayer, i32); 5] {
        BonusLayer::ORDER.map(|layer| (layer, self.layer(layer).get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_every_layer() {
        let mut chain = BonusChain::new();
        chain.set(BonusLayer::ClassBase, StatBlock::new(8, 6, 4, 3, 5));
        chain.set(BonusLayer::Race, StatBlock::new(1, -1, 0, 1, 0));
        chain.set(BonusLayer::LevelGrowth, StatBlock::new(1, 1, 0, 1, 0).scaled(2));
        chain.set(BonusLayer::Instance, StatBlock::single(StatKind::Speed, 1));
        chain.set(BonusLayer::Equipment, StatBlock::single(StatKind::Defense, 2));

        assert_eq!(chain.totals(), StatBlock::new(11, 7, 4, 8, 6));
        assert_eq!(chain.total(StatKind::Defense), 8);
    }

    #[test]
    fn breakdown_follows_chain_order() {
        let mut chain = BonusChain::new();
        chain.set(BonusLayer::Equipment, StatBlock::single(StatKind::Strength, 5));
        chain.set(BonusLayer::ClassBase, StatBlock::single(StatKind::Strength, 10));

        let breakdown = chain.breakdown(StatKind::Strength);
        assert_eq!(breakdown[0], (BonusLayer::ClassBase, 10));
        assert_eq!(breakdown[4], (BonusLayer::Equipment, 5));
        assert_eq!(breakdown.iter().map(|(_, v)| v).sum::<i32>(), 15);
    }
}
