use std::time::Instant;

use iced::keyboard;

/// UI events reduced by [`SubmenuState::update`](crate::SubmenuState::update).
#[derive(Debug, Clone)]
pub enum SubmenuEvent {
    /// Pointer press on the trigger button.
    TriggerPressed,
    /// Key released while the app forwards keyboard input to this submenu.
    KeyReleased(keyboard::Key),
    FocusChanged(bool),
    TriggerEntered,
    TriggerExited,
    ContentEntered,
    ContentExited,
    ContentPressed,
    /// Natural height of the inner item list, in logical pixels.
    ContentMeasured(f32),
    Tick(Instant),
}

/// Outcome of reducing a [`SubmenuEvent`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmenuUpdate {
    /// Requested open value; the owner's `on_open_change` notification.
    pub open_change: Option<bool>,
    /// The flyout placement was recomputed.
    pub reposition: bool,
}
