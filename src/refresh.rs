//! Refresh scheduling for the overlay loop
//!
//! Cycles are triggered either by a fixed-period ticker (polling) or by
//! explicit nudges from host events (foreground change, monitor move, scale
//! change). Polling mode accepts nudges too, so an event can refresh the hole
//! without waiting for the next tick.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

/// How the overlay loop is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RefreshMode {
    /// Run a cycle every `period_ms`, plus on every nudge
    Polling { period_ms: u64 },
    /// Run a cycle only when nudged
    EventDriven,
}

impl Default for RefreshMode {
    fn default() -> Self {
        RefreshMode::Polling {
            period_ms: crate::config::tracking::REFRESH_INTERVAL_MS,
        }
    }
}

/// Why a nudge was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    ForegroundChanged,
    /// The active window moved, resized, minimized or was restored
    ActiveWindowMoved,
    SurfaceMoved,
    ScaleChanged,
    /// Explicit request; the current state is presented even if unchanged
    Manual,
}

/// What woke the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Tick,
    Nudge(RefreshReason),
}

/// Cloneable sender side; nudges the loop into an extra cycle
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: mpsc::UnboundedSender<RefreshReason>,
}

impl RefreshHandle {
    /// Request a cycle. Returns false once the loop is gone.
    pub fn request(&self, reason: RefreshReason) -> bool {
        self.tx.send(reason).is_ok()
    }
}

/// Receiver side consumed by the loop
pub struct RefreshSource {
    period: Option<Duration>,
    ticker: Option<Interval>,
    nudges: mpsc::UnboundedReceiver<RefreshReason>,
    nudges_closed: bool,
}

/// Create a connected handle/source pair for `mode`
pub fn refresh_channel(mode: RefreshMode) -> (RefreshHandle, RefreshSource) {
    let (tx, rx) = mpsc::unbounded_channel();
    let period = match mode {
        RefreshMode::Polling { period_ms } => Some(Duration::from_millis(period_ms.max(1))),
        RefreshMode::EventDriven => None,
    };

    (
        RefreshHandle { tx },
        RefreshSource {
            period,
            ticker: None,
            nudges: rx,
            nudges_closed: false,
        },
    )
}

impl RefreshSource {
    /// Wait for the next trigger.
    ///
    /// A polling source never ends. An event-driven source ends (`None`) once
    /// every [`RefreshHandle`] has been dropped.
    pub async fn next(&mut self) -> Option<RefreshTrigger> {
        loop {
            let Some(period) = self.period else {
                return self.nudges.recv().await.map(RefreshTrigger::Nudge);
            };

            // The interval needs a runtime, so it is created on first use.
            // Missed ticks are skipped: a slow cycle never queues a burst.
            let ticker = self.ticker.get_or_insert_with(|| {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                ticker
            });

            let nudge = tokio::select! {
                _ = ticker.tick() => return Some(RefreshTrigger::Tick),
                nudge = self.nudges.recv(), if !self.nudges_closed => nudge,
            };

            match nudge {
                Some(reason) => return Some(RefreshTrigger::Nudge(reason)),
                None => self.nudges_closed = true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_polling_first_tick_is_immediate() {
        let (_handle, mut source) = refresh_channel(RefreshMode::default());
        let start = tokio::time::Instant::now();
        assert_eq!(source.next().await, Some(RefreshTrigger::Tick));
        assert_eq!(start.elapsed(), Duration::ZERO);

        assert_eq!(source.next().await, Some(RefreshTrigger::Tick));
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_survives_dropped_handles() {
        let (handle, mut source) = refresh_channel(RefreshMode::Polling { period_ms: 50 });
        drop(handle);
        for _ in 0..3 {
            assert_eq!(source.next().await, Some(RefreshTrigger::Tick));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_driven_runs_on_nudges_only() {
        let (handle, mut source) = refresh_channel(RefreshMode::EventDriven);
        assert!(handle.request(RefreshReason::ForegroundChanged));
        assert_eq!(
            source.next().await,
            Some(RefreshTrigger::Nudge(RefreshReason::ForegroundChanged))
        );

        drop(handle);
        assert_eq!(source.next().await, None);
    }

    #[test]
    fn test_request_fails_after_source_dropped() {
        let (handle, source) = refresh_channel(RefreshMode::EventDriven);
        drop(source);
        assert!(!handle.request(RefreshReason::Manual));
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_value(RefreshMode::default()).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "polling", "period_ms": 100}));
    }
}
