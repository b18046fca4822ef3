//! Overlay loop driver
//!
//! One cycle: resolve the overlay scale, ask the provider for the active
//! window, compute the hole geometry and write it into the visual state.
//! A failed cycle leaves the visual state as it was and never stops the loop.

use anyhow::{Context, Result};

use crate::geometry::{compute_geometry, LogicalRect};
use crate::refresh::{RefreshReason, RefreshSource, RefreshTrigger};
use crate::render::{apply_geometry, OverlayVisualState};
use crate::scale::resolve_surface;
use crate::traits::{ActiveRegionProvider, MaskPresenter, ScaleResolver};

/// Result of a successful cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A hole was placed over the active window
    Tracked(LogicalRect),
    /// No qualifying active window; every region is hidden
    NoActiveWindow,
}

/// Counters kept for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub cycles: u64,
    pub failed_cycles: u64,
    pub presented: u64,
}

pub struct OverlayLoop<S, P, M> {
    scale: S,
    provider: P,
    presenter: M,
    state: OverlayVisualState,
    last_presented: Option<OverlayVisualState>,
    stats: LoopStats,
}

impl<S, P, M> OverlayLoop<S, P, M>
where
    S: ScaleResolver,
    P: ActiveRegionProvider,
    M: MaskPresenter,
{
    pub fn new(scale: S, provider: P, presenter: M) -> Self {
        Self {
            scale,
            provider,
            presenter,
            state: OverlayVisualState::default(),
            last_presented: None,
            stats: LoopStats::default(),
        }
    }

    pub fn state(&self) -> &OverlayVisualState {
        &self.state
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Run a single refresh cycle.
    ///
    /// Provider and scale errors are returned before anything is written, so
    /// the previous geometry stays on screen.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome> {
        self.stats.cycles += 1;

        let metrics = resolve_surface(&self.scale)?;
        let region = self
            .provider
            .active_region()
            .context("Failed to query active window")?;

        let geometry = compute_geometry(region.as_ref(), metrics.scale, metrics.viewport);
        apply_geometry(&mut self.state, geometry.as_ref());
        self.present();

        Ok(match geometry {
            Some(geometry) => CycleOutcome::Tracked(geometry.hole),
            None => CycleOutcome::NoActiveWindow,
        })
    }

    /// Present the next cycle's state even if it did not change
    pub fn invalidate(&mut self) {
        self.last_presented = None;
    }

    fn present(&mut self) {
        if self.last_presented == Some(self.state) {
            return;
        }

        match self.presenter.present(&self.state) {
            Ok(()) => {
                self.last_presented = Some(self.state);
                self.stats.presented += 1;
            }
            Err(e) => {
                // Retried on the next cycle since last_presented is stale
                self.last_presented = None;
                tracing::warn!(error = %e, "Failed to present overlay state");
            }
        }
    }

    /// Drive cycles from `source` until it is exhausted.
    ///
    /// Cycles run one at a time on this task; ticks missed while a cycle is
    /// slow are skipped by the source rather than stacked.
    pub async fn run(mut self, mut source: RefreshSource) -> LoopStats {
        tracing::info!("Overlay loop started");

        while let Some(trigger) = source.next().await {
            // The surface was reloaded and lost what it had drawn
            if trigger == RefreshTrigger::Nudge(RefreshReason::Manual) {
                self.invalidate();
            }

            match self.run_cycle() {
                Ok(outcome) => {
                    if let RefreshTrigger::Nudge(reason) = trigger {
                        tracing::trace!(?reason, ?outcome, "Nudged refresh");
                    }
                }
                Err(e) => {
                    self.stats.failed_cycles += 1;
                    tracing::warn!(error = %format!("{:#}", e), "Error in overlay cycle");
                }
            }
        }

        tracing::info!(
            cycles = self.stats.cycles,
            failed = self.stats.failed_cycles,
            "Overlay loop stopped"
        );
        self.stats
    }
}
