//! Window events that move the hole
//!
//! The Windows host hooks a handful of WinEvents and asks [`nudge_for`]
//! whether each one should trigger a refresh. Kept free of the `windows`
//! crate so the decision can be tested anywhere.

use crate::refresh::RefreshReason;

/// WinEvent ids (winuser.h)
pub mod ids {
    pub const EVENT_SYSTEM_FOREGROUND: u32 = 0x0003;
    pub const EVENT_SYSTEM_MOVESIZEEND: u32 = 0x000B;
    pub const EVENT_SYSTEM_MINIMIZESTART: u32 = 0x0016;
    pub const EVENT_SYSTEM_MINIMIZEEND: u32 = 0x0017;
    pub const EVENT_OBJECT_LOCATIONCHANGE: u32 = 0x800B;

    /// `idObject` of an event about the window itself
    pub const OBJID_WINDOW: i32 = 0;
}

/// Ranges to pass to `SetWinEventHook`, as `(min, max)`
pub const HOOKED_RANGES: [(u32, u32); 2] = [
    (ids::EVENT_SYSTEM_FOREGROUND, ids::EVENT_SYSTEM_MINIMIZEEND),
    (ids::EVENT_OBJECT_LOCATIONCHANGE, ids::EVENT_OBJECT_LOCATIONCHANGE),
];

/// Refresh reason for a WinEvent, or `None` when it does not affect the hole.
///
/// `is_foreground` tells whether the event's window is the current foreground
/// window. Location changes fire for every window and for the caret and
/// cursor, so only the foreground window's own frame counts.
pub fn nudge_for(event: u32, id_object: i32, is_foreground: bool) -> Option<RefreshReason> {
    match event {
        ids::EVENT_SYSTEM_FOREGROUND => Some(RefreshReason::ForegroundChanged),
        ids::EVENT_SYSTEM_MINIMIZESTART | ids::EVENT_SYSTEM_MINIMIZEEND => {
            Some(RefreshReason::ActiveWindowMoved)
        }
        ids::EVENT_SYSTEM_MOVESIZEEND if is_foreground => Some(RefreshReason::ActiveWindowMoved),
        ids::EVENT_OBJECT_LOCATIONCHANGE if is_foreground && id_object == ids::OBJID_WINDOW => {
            Some(RefreshReason::ActiveWindowMoved)
        }
        _ => None,
    }
}
