use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use hamaguri_overlay::{
    refresh_channel, ActiveRegionProvider, MaskPresenter, OverlayLoop, OverlayVisualState,
    PhysicalRect, RefreshMode, RefreshReason, ScaleResolver, SurfaceLayout, SurfaceRegistry,
};
use tokio::time::Instant;

struct FixedScale;

impl ScaleResolver for FixedScale {
    fn scale_factor(&self) -> Result<f64> {
        Ok(1.5)
    }

    fn physical_size(&self) -> Result<(u32, u32)> {
        Ok((2880, 1620))
    }
}

/// Fails every other call and records when it was asked
#[derive(Default)]
struct FlakyProvider {
    calls: Mutex<Vec<Instant>>,
}

impl ActiveRegionProvider for FlakyProvider {
    fn active_region(&self) -> Result<Option<PhysicalRect>> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(Instant::now());
        if calls.len() % 2 == 0 {
            bail!("window vanished mid-query");
        }
        Ok(Some(PhysicalRect::new(300, 150, 1500, 900)))
    }
}

/// Reports whatever rectangle the test last placed
struct MovableProvider {
    rect: Mutex<PhysicalRect>,
    calls: AtomicUsize,
}

impl MovableProvider {
    fn at(rect: PhysicalRect) -> Self {
        Self {
            rect: Mutex::new(rect),
            calls: AtomicUsize::new(0),
        }
    }

    fn move_to(&self, rect: PhysicalRect) {
        *self.rect.lock().unwrap() = rect;
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ActiveRegionProvider for MovableProvider {
    fn active_region(&self) -> Result<Option<PhysicalRect>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(*self.rect.lock().unwrap()))
    }
}

#[derive(Default)]
struct RecordingPresenter {
    states: Mutex<Vec<OverlayVisualState>>,
}

impl MaskPresenter for RecordingPresenter {
    fn present(&self, state: &OverlayVisualState) -> Result<()> {
        self.states.lock().unwrap().push(*state);
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn provider_failures_do_not_break_the_cadence() {
    let provider = Arc::new(FlakyProvider::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let (_handle, source) = refresh_channel(RefreshMode::default());

    let overlay = OverlayLoop::new(FixedScale, provider.clone(), presenter.clone());
    let task = tokio::spawn(overlay.run(source));

    tokio::time::sleep(Duration::from_millis(450)).await;
    task.abort();

    let calls = provider.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 5);
    for pair in calls.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::from_millis(100));
    }

    // Only the first successful cycle changed anything
    let states = presenter.states.lock().unwrap();
    assert_eq!(states.len(), 1);
    assert!(states[0].all_visible());
    assert_eq!(states[0].hole.left, 200);
    assert_eq!(states[0].hole.width, 800);
}

#[tokio::test(start_paused = true)]
async fn event_driven_loop_runs_per_nudge_and_stops() {
    let provider = Arc::new(FlakyProvider::default());
    let (handle, source) = refresh_channel(RefreshMode::EventDriven);
    let overlay = OverlayLoop::new(FixedScale, provider.clone(), RecordingPresenter::default());

    assert!(handle.request(RefreshReason::ForegroundChanged));
    assert!(handle.request(RefreshReason::SurfaceMoved));
    assert!(handle.request(RefreshReason::Manual));
    drop(handle);

    let stats = overlay.run(source).await;
    assert_eq!(stats.cycles, 3);
    assert_eq!(stats.failed_cycles, 1);
    assert_eq!(provider.calls.lock().unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn polling_loop_also_runs_on_nudges() {
    let provider = Arc::new(MovableProvider::at(PhysicalRect::new(30, 30, 330, 330)));
    let presenter = Arc::new(RecordingPresenter::default());
    let (handle, source) = refresh_channel(RefreshMode::Polling { period_ms: 100 });
    let overlay = OverlayLoop::new(FixedScale, provider.clone(), presenter.clone());
    let task = tokio::spawn(overlay.run(source));

    // t=30: nudge between ticks, nothing changed so nothing is re-sent
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(handle.request(RefreshReason::ActiveWindowMoved));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(provider.calls(), 2);
    assert_eq!(presenter.states.lock().unwrap().len(), 1);

    // t=60: a manual nudge re-sends the unchanged state
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(handle.request(RefreshReason::Manual));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(provider.calls(), 3);
    {
        let states = presenter.states.lock().unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0], states[1]);
    }

    // t=110: the regular tick still fires at 100
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(provider.calls(), 4);

    task.abort();
}

#[tokio::test(start_paused = true)]
async fn event_driven_loop_follows_a_moved_window() {
    let provider = Arc::new(MovableProvider::at(PhysicalRect::new(15, 15, 315, 315)));
    let presenter = Arc::new(RecordingPresenter::default());
    let (handle, source) = refresh_channel(RefreshMode::EventDriven);
    let overlay = OverlayLoop::new(FixedScale, provider.clone(), presenter.clone());
    let task = tokio::spawn(overlay.run(source));

    assert!(handle.request(RefreshReason::Manual));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(presenter.states.lock().unwrap()[0].hole.left, 10);

    provider.move_to(PhysicalRect::new(600, 450, 900, 750));
    assert!(handle.request(RefreshReason::ActiveWindowMoved));
    tokio::time::sleep(Duration::from_millis(10)).await;

    let states = presenter.states.lock().unwrap();
    assert_eq!(provider.calls(), 2);
    assert_eq!(states.len(), 2);
    assert_eq!(states[1].hole.left, 400);
    assert_eq!(states[1].hole.top, 300);
    drop(states);

    task.abort();
}

#[test]
fn settings_window_never_starts_tracking() {
    let registry = SurfaceRegistry::new();
    let started = AtomicUsize::new(0);

    let layout = registry.initialize("main", &FixedScale, || {
        started.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert_eq!(layout, SurfaceLayout::settings());
    assert!(!layout.tracking);
    assert_eq!(started.load(Ordering::SeqCst), 0);
}

#[test]
fn overlay_starts_tracking_once_per_window() {
    let registry = SurfaceRegistry::new();
    let started = AtomicUsize::new(0);
    let start = || {
        started.fetch_add(1, Ordering::SeqCst);
        Ok::<(), anyhow::Error>(())
    };

    let first = registry.initialize("overlay", &FixedScale, start);
    let reloaded = registry.initialize("overlay", &FixedScale, start);

    assert_eq!(first, SurfaceLayout::overlay());
    assert_eq!(reloaded, first);
    assert_eq!(started.load(Ordering::SeqCst), 1);
}
