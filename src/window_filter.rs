//! Platform-agnostic active window filtering
//!
//! While walking down the z-order from the foreground window, each window is
//! judged here. The first `Accept` is the window the hole is placed over.
//! The overlay itself, shell surfaces and transient popups never qualify.

use crate::config::frame::{POPUP_WINDOW_CLASSES, SYSTEM_WINDOW_CLASSES, SYSTEM_WINDOW_CLASS_FRAGMENTS};

/// Facts about one window seen during the z-order walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCandidate {
    pub title: String,
    pub class_name: String,
    pub visible: bool,
    /// The window is the overlay (or another window owned by this app)
    pub is_own_window: bool,
}

impl WindowCandidate {
    pub fn new(title: &str, class_name: &str, visible: bool) -> Self {
        Self {
            title: title.to_string(),
            class_name: class_name.to_string(),
            visible,
            is_own_window: false,
        }
    }

    pub fn own(mut self) -> Self {
        self.is_own_window = true;
        self
    }
}

/// Verdict for a [`WindowCandidate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateVerdict {
    Accept,
    SkipOwnWindow,
    SkipSystem,
    SkipInvisible,
    SkipUntitled,
    SkipPopup,
}

impl CandidateVerdict {
    pub fn is_accept(self) -> bool {
        self == CandidateVerdict::Accept
    }
}

/// Shell windows (desktop, taskbars, immersive shell) by class name
pub fn is_system_class(class_name: &str) -> bool {
    SYSTEM_WINDOW_CLASSES.contains(&class_name)
        || SYSTEM_WINDOW_CLASS_FRAGMENTS
            .iter()
            .any(|fragment| class_name.contains(fragment))
}

pub fn judge(candidate: &WindowCandidate) -> CandidateVerdict {
    if candidate.is_own_window {
        CandidateVerdict::SkipOwnWindow
    } else if is_system_class(&candidate.class_name) {
        CandidateVerdict::SkipSystem
    } else if !candidate.visible {
        CandidateVerdict::SkipInvisible
    } else if candidate.title.is_empty() {
        CandidateVerdict::SkipUntitled
    } else if POPUP_WINDOW_CLASSES.contains(&candidate.class_name.as_str()) {
        CandidateVerdict::SkipPopup
    } else {
        CandidateVerdict::Accept
    }
}

/// First qualifying window of a z-order walk, with the key it was walked under.
///
/// `walk` yields `(key, candidate)` pairs top to bottom and is consumed
/// lazily, so windows below the accepted one are never inspected.
pub fn first_qualifying<K, I>(walk: I) -> Option<(K, WindowCandidate)>
where
    K: std::fmt::Debug,
    I: IntoIterator<Item = (K, WindowCandidate)>,
{
    for (key, candidate) in walk {
        match judge(&candidate) {
            CandidateVerdict::Accept => {
                tracing::trace!(
                    title = %candidate.title,
                    class = %candidate.class_name,
                    ?key,
                    "Found target window"
                );
                return Some((key, candidate));
            }
            verdict => {
                tracing::trace!(
                    title = %candidate.title,
                    class = %candidate.class_name,
                    ?verdict,
                    "Skipping window"
                );
            }
        }
    }
    None
}
