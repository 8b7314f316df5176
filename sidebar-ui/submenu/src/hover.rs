use crate::context::Level;

/// Pointer presence driving flyout visibility in a collapsed sidebar.
///
/// This is an overlay on top of the open flag; it never changes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverTracker {
    trigger: bool,
    content: bool,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the flyout should be shown because of hover.
    pub fn is_open_when_collapsed(&self) -> bool {
        self.trigger || self.content
    }

    pub fn is_trigger_hovered(&self) -> bool {
        self.trigger
    }

    pub fn trigger_entered(&mut self) {
        self.trigger = true;
    }

    pub fn trigger_exited(&mut self) {
        self.trigger = false;
    }

    pub fn content_entered(&mut self) {
        self.content = true;
    }

    pub fn content_exited(&mut self) {
        self.content = false;
    }

    /// A press inside the content panel hides the flyout on close-on-click
    /// menus.
    pub fn content_pressed(&mut self, close_on_click: bool) {
        if close_on_click {
            self.reset();
        }
    }

    /// Drop a stale hover when the sidebar collapses around a top-level item.
    pub fn sidebar_changed(&mut self, collapsed: bool, level: Level) {
        if collapsed && level.is_top() && self.is_open_when_collapsed() {
            log::debug!("submenu flyout hover reset after sidebar collapse");
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.trigger = false;
        self.content = false;
    }
}
