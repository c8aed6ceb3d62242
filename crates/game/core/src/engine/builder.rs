use std::collections::BTreeMap;

use super::{Battle, BattleState, InitError};
use crate::config::BattleConfig;
use crate::env::{DefinitionOracle, DefinitionTables, PcgRng, RngSource};
use crate::state::{GridModel, TurnOrder};

/// Builder for [`Battle`].
///
/// A grid is mandatory. Definitions default to empty tables (every unit
/// degrades to zero-value defaults) and the random source defaults to a
/// [`PcgRng`] seeded with `seed` (0 unless set).
pub struct BattleBuilder {
    config: BattleConfig,
    grid: Option<GridModel>,
    tables: Option<Box<dyn DefinitionOracle>>,
    rng: Option<Box<dyn RngSource>>,
    seed: u64,
}

impl BattleBuilder {
    pub fn new() -> Self {
        Self {
            config: BattleConfig::default(),
            grid: None,
            tables: None,
            rng: None,
            seed: 0,
        }
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn grid(mut self, grid: GridModel) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn tables(mut self, tables: impl DefinitionOracle + 'static) -> Self {
        self.tables = Some(Box::new(tables));
        self
    }

    pub fn boxed_tables(mut self, tables: Box<dyn DefinitionOracle>) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the random source; the seed is ignored when set.
    pub fn rng(mut self, rng: impl RngSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn boxed_rng(mut self, rng: Box<dyn RngSource>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn build(self) -> Result<Battle, InitError> {
        let grid = self.grid.ok_or(InitError::MissingGrid)?;
        if grid.width() == 0 || grid.height() == 0 {
            return Err(InitError::EmptyGrid {
                width: grid.width(),
                height: grid.height(),
            });
        }

        let tables = self
            .tables
            .unwrap_or_else(|| Box::new(DefinitionTables::new()));
        let seed = self.seed;
        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(PcgRng::seeded(seed)));

        Ok(Battle {
            config: self.config,
            grid,
            tables,
            rng,
            units: BTreeMap::new(),
            turn_order: TurnOrder::default(),
            state: BattleState::Setup,
            active: None,
            turns_started: 0,
            cycles_completed: 0,
            move_ledger: Vec::new(),
            committed: false,
            events: Vec::new(),
        })
    }
}

impl Default for BattleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_required() {
        let error = Battle::builder().seed(7).build().unwrap_err();
        assert_eq!(error, InitError::MissingGrid);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let error = Battle::builder()
            .grid(GridModel::new(0, 4))
            .build()
            .unwrap_err();
        assert!(matches!(error, InitError::EmptyGrid { width: 0, .. }));
    }

    #[test]
    fn built_battle_starts_in_setup() {
        let battle = Battle::builder().grid(GridModel::new(4, 4)).build().unwrap();
        assert_eq!(battle.state(), BattleState::Setup);
        assert!(battle.active_unit().is_none());
    }
}
