use std::sync::{Arc, Mutex};

use hamaguri_overlay::refresh::{RefreshHandle, RefreshSource};
use hamaguri_overlay::settings::Settings;
use hamaguri_overlay::SurfaceRegistry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) settings: Arc<Mutex<Settings>>,
    pub(crate) surfaces: Arc<SurfaceRegistry>,
    /// Nudges the overlay loop (window events, foreground hook)
    pub(crate) refresh: RefreshHandle,
    /// Taken by the overlay loop when it starts
    pub(crate) refresh_source: Arc<Mutex<Option<RefreshSource>>>,
}
