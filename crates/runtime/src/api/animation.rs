//! Seam between the battle worker and whatever draws unit movement.
//!
//! The engine relocates a unit in one command; the worker then awaits the
//! animator before the mover does anything else, so a presentation layer can
//! pace the walk cell by cell.
use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use tactics_core::{Position, UnitId};

#[async_trait]
pub trait MovementAnimator: Send + Sync {
    /// Resolves once `unit` has visibly walked `path` (cells entered, in order).
    async fn animate(&self, unit: UnitId, path: &[Position]);
}

/// Completes immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantAnimator;

#[async_trait]
impl MovementAnimator for InstantAnimator {
    async fn animate(&self, _unit: UnitId, _path: &[Position]) {}
}

/// Spends a fixed duration per cell entered.
#[derive(Debug, Clone, Copy)]
pub struct PacedAnimator {
    step: Duration,
}

impl PacedAnimator {
    pub fn new(step: Duration) -> Self {
        Self { step }
    }
}

#[async_trait]
impl MovementAnimator for PacedAnimator {
    async fn animate(&self, unit: UnitId, path: &[Position]) {
        for cell in path {
            tokio::time::sleep(self.step).await;
            trace!(target: "tactics::runtime", %unit, ?cell, "unit stepped");
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn paced_animator_waits_per_cell() {
        let animator = PacedAnimator::new(Duration::from_millis(100));
        let path = [Position::new(1, 0), Position::new(2, 0), Position::new(2, 1)];

        let started = Instant::now();
        animator.animate(UnitId(1), &path).await;
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn instant_animator_takes_no_time() {
        let started = Instant::now();
        InstantAnimator.animate(UnitId(1), &[Position::new(0, 1)]).await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
