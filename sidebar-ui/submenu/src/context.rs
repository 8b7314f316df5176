use std::time::Duration;

use iced::Element;

use crate::style::MenuItemStyles;

/// Transition duration used when no settings override it.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Nesting depth of a submenu within the menu tree.
///
/// Top-level items sit at [`Level::ROOT`]. Every submenu hands
/// [`Level::child`] to the items rendered inside its content panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(usize);

impl Level {
    pub const ROOT: Self = Self(0);

    pub const fn new(depth: usize) -> Self {
        Self(depth)
    }

    pub const fn depth(self) -> usize {
        self.0
    }

    /// Level re-provided to descendants.
    pub const fn child(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn is_top(self) -> bool {
        self.0 == 0
    }
}

/// Read-only sidebar state shared by every item of a sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarContext {
    /// Sidebar is in icon-only mode; top-level submenus become flyouts.
    pub collapsed: bool,
    pub rtl: bool,
    /// Duration of the sidebar's own width transition.
    pub transition_duration: Duration,
}

impl Default for SidebarContext {
    fn default() -> Self {
        Self {
            collapsed: false,
            rtl: false,
            transition_duration: DEFAULT_TRANSITION_DURATION,
        }
    }
}

/// State snapshot handed to a custom expand icon renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandIconParams {
    pub level: Level,
    pub disabled: bool,
    pub active: bool,
    pub open: bool,
}

type ExpandIconRenderer<Message> =
    dyn Fn(ExpandIconParams) -> Element<'static, Message>;

/// Read-only menu configuration shared by every item of a menu.
pub struct MenuContext<Message> {
    render_expand_icon: Option<Box<ExpandIconRenderer<Message>>>,
    close_on_click: bool,
    menu_item_styles: Option<MenuItemStyles>,
    transition_duration: Duration,
}

impl<Message> Default for MenuContext<Message> {
    fn default() -> Self {
        Self {
            render_expand_icon: None,
            close_on_click: false,
            menu_item_styles: None,
            transition_duration: DEFAULT_TRANSITION_DURATION,
        }
    }
}

impl<Message> MenuContext<Message> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in chevron with a custom expand indicator.
    pub fn render_expand_icon(
        mut self,
        render: impl Fn(ExpandIconParams) -> Element<'static, Message>
        + 'static,
    ) -> Self {
        self.render_expand_icon = Some(Box::new(render));
        self
    }

    /// Hide hover flyouts when a press lands inside their content.
    pub fn close_on_click(mut self, close_on_click: bool) -> Self {
        self.close_on_click = close_on_click;
        self
    }

    pub fn menu_item_styles(mut self, styles: MenuItemStyles) -> Self {
        self.menu_item_styles = Some(styles);
        self
    }

    /// Duration of the submenu height transition.
    pub fn transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    pub fn closes_on_click(&self) -> bool {
        self.close_on_click
    }

    pub fn styles(&self) -> Option<&MenuItemStyles> {
        self.menu_item_styles.as_ref()
    }

    pub fn duration(&self) -> Duration {
        self.transition_duration
    }

    pub(crate) fn expand_icon(
        &self,
        params: ExpandIconParams,
    ) -> Option<Element<'static, Message>> {
        self.render_expand_icon.as_ref().map(|render| render(params))
    }
}

/// Contexts a submenu reads while reducing events and rendering.
pub struct SubmenuContext<'a, Message> {
    pub sidebar: &'a SidebarContext,
    pub menu: &'a MenuContext<Message>,
    pub level: Level,
}

impl<'a, Message> SubmenuContext<'a, Message> {
    /// Context for a top-level item.
    pub fn root(
        sidebar: &'a SidebarContext,
        menu: &'a MenuContext<Message>,
    ) -> Self {
        Self {
            sidebar,
            menu,
            level: Level::ROOT,
        }
    }

    /// Context handed to the children of a submenu at this level.
    pub fn nested(&self) -> Self {
        Self {
            sidebar: self.sidebar,
            menu: self.menu,
            level: self.level.child(),
        }
    }

    /// Whether a submenu at this level renders its content as a flyout.
    pub fn is_flyout(&self) -> bool {
        self.sidebar.collapsed && self.level.is_top()
    }
}

impl<Message> Clone for SubmenuContext<'_, Message> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Message> Copy for SubmenuContext<'_, Message> {}
