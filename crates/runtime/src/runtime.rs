//! High-level runtime orchestrator.
//!
//! The runtime owns the battle worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the battle.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use tactics_core::{Battle, DefinitionOracle, DefinitionTables, GridModel, RngSource, UnitSpec};

use crate::api::{
    BattleHandle, InstantAnimator, MovementAnimator, PacedAnimator, Result, RuntimeError,
};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, Topic};
use crate::workers::{BattleWorker, Command};

/// Main runtime that hosts one battle
///
/// Design: Runtime owns the worker task. [`BattleHandle`] provides a
/// cloneable façade for clients.
pub struct Runtime {
    handle: BattleHandle,
    worker: JoinHandle<()>,
    seed: u64,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Cloneable handle for issuing commands
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Seed the battle's random source was built with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Stops the worker once every outstanding handle clone is dropped
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`]
///
/// A grid and a roster are required. The battle is initialized from the
/// roster during [`RuntimeBuilder::build`] and waits in deployment for
/// [`BattleHandle::start_battle`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    grid: Option<GridModel>,
    tables: Option<Box<dyn DefinitionOracle>>,
    roster: Option<Vec<UnitSpec>>,
    rng: Option<Box<dyn RngSource>>,
    animator: Option<Arc<dyn MovementAnimator>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            grid: None,
            tables: None,
            roster: None,
            rng: None,
            animator: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
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

    pub fn roster(mut self, roster: Vec<UnitSpec>) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Replaces the seeded generator, e.g. with a scripted one in tests
    pub fn rng(mut self, rng: impl RngSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Defaults to [`PacedAnimator`] at the configured step time
    pub fn animator(mut self, animator: impl MovementAnimator + 'static) -> Self {
        self.animator = Some(Arc::new(animator));
        self
    }

    pub async fn build(self) -> Result<Runtime> {
        let grid = self.grid.ok_or(RuntimeError::MissingGrid)?;
        let roster = self.roster.ok_or(RuntimeError::MissingRoster)?;
        let config = self.config;

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(target: "tactics::runtime", seed, "building battle runtime");

        let mut builder = Battle::builder()
            .config(config.battle.clone())
            .grid(grid)
            .boxed_tables(
                self.tables
                    .unwrap_or_else(|| Box::new(DefinitionTables::new())),
            )
            .seed(seed);
        if let Some(rng) = self.rng {
            builder = builder.boxed_rng(rng);
        }
        let mut battle = builder.build()?;
        battle.initialize(roster)?;

        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        event_bus.publish_battle(battle.drain_events());

        let animator = self.animator.unwrap_or_else(|| {
            if config.pacing.move_step.is_zero() {
                Arc::new(InstantAnimator)
            } else {
                Arc::new(PacedAnimator::new(config.pacing.move_step))
            }
        });

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size.max(1));
        let worker = BattleWorker::new(battle, command_rx, event_bus.clone(), animator, config.pacing);
        let worker = tokio::spawn(worker.run());

        Ok(Runtime {
            handle: BattleHandle::new(command_tx, event_bus),
            worker,
            seed,
        })
    }
}
