use std::time::{Duration, Instant};

use iced::Subscription;
use iced::keyboard::{self, key};

use crate::classes::{ClassList, StateFlags};
use crate::context::{Level, SubmenuContext};
use crate::event::{SubmenuEvent, SubmenuUpdate};
use crate::hover::HoverTracker;
use crate::open_state::OpenState;
use crate::positioning::{FlyoutPositioner, Positioner, RepositionSchedule};
use crate::style::{MenuItemElement, StyleParams};
use crate::surface::PanelSurface;
use crate::transition::{ContentHeight, TransitionDriver, TransitionPhase};

/// Frame interval used while an animation or deferred recompute is pending.
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContextSnapshot {
    collapsed: bool,
    rtl: bool,
    sidebar_duration: Duration,
    level: Level,
}

impl ContextSnapshot {
    fn of<Message>(ctx: &SubmenuContext<'_, Message>) -> Self {
        Self {
            collapsed: ctx.sidebar.collapsed,
            rtl: ctx.sidebar.rtl,
            sidebar_duration: ctx.sidebar.transition_duration,
            level: ctx.level,
        }
    }
}

/// Persistent state of one submenu instance.
///
/// Keep one per submenu node in your app state, feed it every
/// [`SubmenuEvent`] addressed to that node, and render it with
/// [`SubMenu`](crate::SubMenu).
#[derive(Debug)]
pub struct SubmenuState {
    open: OpenState,
    transition: TransitionDriver,
    hover: HoverTracker,
    surface: PanelSurface,
    positioner: FlyoutPositioner,
    reposition: RepositionSchedule,
    context: Option<ContextSnapshot>,
    focused: bool,
    mounted: bool,
}

impl SubmenuState {
    /// Uncontrolled submenu starting open when `default_open` is set.
    pub fn new(default_open: bool) -> Self {
        Self::with_open_state(OpenState::uncontrolled(default_open))
    }

    /// Controlled submenu; push owner changes through [`Self::set_open`].
    pub fn controlled(open: bool) -> Self {
        Self::with_open_state(OpenState::controlled(open))
    }

    fn with_open_state(open: OpenState) -> Self {
        let is_open = open.is_open();
        Self {
            open,
            transition: TransitionDriver::new(is_open),
            hover: HoverTracker::new(),
            surface: PanelSurface::new(is_open),
            positioner: FlyoutPositioner::new(false),
            reposition: RepositionSchedule::default(),
            context: None,
            focused: false,
            mounted: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_open()
    }

    pub fn open_state(&self) -> OpenState {
        self.open
    }

    pub fn phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    pub fn is_open_when_collapsed(&self) -> bool {
        self.hover.is_open_when_collapsed()
    }

    pub fn is_trigger_hovered(&self) -> bool {
        self.hover.is_trigger_hovered()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn surface(&self) -> &PanelSurface {
        &self.surface
    }

    pub fn positioner(&self) -> &FlyoutPositioner {
        &self.positioner
    }

    /// Feed trigger, content and viewport geometry to the flyout positioner.
    pub fn positioner_mut(&mut self) -> &mut FlyoutPositioner {
        &mut self.positioner
    }

    /// Height of the inline content panel for the current frame.
    pub fn content_height(&self) -> ContentHeight {
        if self.surface.is_measured() {
            return self.surface.frame_height();
        }

        if self.is_open() {
            ContentHeight::Auto
        } else {
            ContentHeight::Px(0.0)
        }
    }

    pub fn style_params(
        &self,
        level: Level,
        active: bool,
        disabled: bool,
    ) -> StyleParams {
        StyleParams {
            level,
            disabled,
            active,
            is_submenu: true,
            open: self.is_open(),
        }
    }

    /// Class tokens of `element` for the current state.
    pub fn class_list(
        &self,
        element: MenuItemElement,
        active: bool,
        disabled: bool,
    ) -> ClassList {
        ClassList::new(
            element,
            StateFlags::from_state(active, disabled, self.is_open()),
        )
    }

    /// Reduce a UI event.
    pub fn update<Message>(
        &mut self,
        event: SubmenuEvent,
        ctx: &SubmenuContext<'_, Message>,
        now: Instant,
    ) -> SubmenuUpdate {
        if !self.mounted {
            log::debug!("submenu event ignored after unmount: {event:?}");
            return SubmenuUpdate::default();
        }

        self.surface.sync_clock(now);
        let mut update = SubmenuUpdate::default();

        match event {
            SubmenuEvent::TriggerPressed => {
                self.focused = true;
                update.open_change = Some(self.toggle(ctx, now));
            },
            SubmenuEvent::KeyReleased(key) => {
                if self.focused && is_enter(&key) {
                    update.open_change = Some(self.toggle(ctx, now));
                }
            },
            SubmenuEvent::FocusChanged(focused) => self.focused = focused,
            SubmenuEvent::TriggerEntered => {
                self.hover.trigger_entered();
                self.positioner.update();
            },
            SubmenuEvent::TriggerExited => self.hover.trigger_exited(),
            SubmenuEvent::ContentEntered => self.hover.content_entered(),
            SubmenuEvent::ContentExited => self.hover.content_exited(),
            SubmenuEvent::ContentPressed => {
                self.hover.content_pressed(ctx.menu.closes_on_click());
            },
            SubmenuEvent::ContentMeasured(height) => {
                self.surface.set_natural_height(Some(height));
            },
            SubmenuEvent::Tick(at) => {
                self.surface.sync_clock(at);
                self.transition.poll(at, &mut self.surface);
                if self.reposition.poll(at) {
                    self.positioner.update();
                    update.reposition = true;
                }
            },
        }

        self.surface.commit();
        update
    }

    /// Push the owner's value into a controlled submenu.
    ///
    /// The height transition runs only when the value actually changes.
    pub fn set_open<Message>(
        &mut self,
        open: bool,
        ctx: &SubmenuContext<'_, Message>,
        now: Instant,
    ) {
        if !self.mounted {
            return;
        }

        self.surface.sync_clock(now);
        if self.open.set_controlled(open) {
            self.run_transition(open, ctx, now);
        }
        self.surface.commit();
    }

    /// Observe the sidebar context and nesting level for this frame.
    ///
    /// On any change the flyout is repositioned once the sidebar finished
    /// its own transition, and a hover flyout is dropped when the sidebar
    /// collapses around a top-level item.
    pub fn sync_context<Message>(
        &mut self,
        ctx: &SubmenuContext<'_, Message>,
        now: Instant,
    ) {
        if !self.mounted {
            return;
        }

        let snapshot = ContextSnapshot::of(ctx);
        if self.context == Some(snapshot) {
            return;
        }

        self.context = Some(snapshot);
        self.positioner.set_rtl(ctx.sidebar.rtl);
        self.reposition
            .schedule(now, ctx.sidebar.transition_duration);
        self.hover.sidebar_changed(ctx.sidebar.collapsed, ctx.level);
    }

    /// Frame ticks while a transition or recompute is pending.
    pub fn subscription(&self) -> Subscription<SubmenuEvent> {
        if self.needs_ticks() {
            iced::time::every(TICK_INTERVAL).map(SubmenuEvent::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn needs_ticks(&self) -> bool {
        self.mounted
            && (self.transition.is_pending()
                || self.reposition.is_pending()
                || self.surface.is_animating())
    }

    /// Release pending timers; later events are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }

        self.mounted = false;
        self.transition.cancel();
        self.reposition.cancel();
        self.hover.reset();
        self.focused = false;
        log::debug!("submenu unmounted");
    }

    fn toggle<Message>(
        &mut self,
        ctx: &SubmenuContext<'_, Message>,
        now: Instant,
    ) -> bool {
        let requested = self.open.request_toggle();
        if !self.open.is_controlled() {
            self.run_transition(requested, ctx, now);
        }
        requested
    }

    fn run_transition<Message>(
        &mut self,
        open: bool,
        ctx: &SubmenuContext<'_, Message>,
        now: Instant,
    ) {
        let duration = ctx.menu.duration();
        self.surface.set_duration(duration);
        if open {
            self.transition.expand(&mut self.surface, now, duration);
        } else {
            self.transition.collapse(&mut self.surface);
        }
    }
}

impl Drop for SubmenuState {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn is_enter(key: &keyboard::Key) -> bool {
    matches!(key, keyboard::Key::Named(key::Named::Enter))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use iced::keyboard::{self, key};
    use iced::{Point, Rectangle, Size};

    use super::SubmenuState;
    use crate::classes::MenuClass;
    use crate::context::{Level, MenuContext, SidebarContext, SubmenuContext};
    use crate::event::SubmenuEvent;
    use crate::positioning::Placement;
    use crate::style::MenuItemElement;
    use crate::transition::{ContentHeight, Overflow, TransitionPhase};

    const DURATION: Duration = Duration::from_millis(300);

    fn menu() -> MenuContext<()> {
        MenuContext::new().transition_duration(DURATION)
    }

    fn measured(state: &mut SubmenuState, menu: &MenuContext<()>) {
        let sidebar = SidebarContext::default();
        let ctx = SubmenuContext::root(&sidebar, menu);
        let _ = state.update(
            SubmenuEvent::ContentMeasured(120.0),
            &ctx,
            Instant::now(),
        );
    }

    #[test]
    fn given_uncontrolled_submenu_when_toggled_repeatedly_then_alternates() {
        let sidebar = SidebarContext::default();
        let menu = menu();
        let ctx = SubmenuContext::root(&sidebar, &menu);
        let mut state = SubmenuState::new(false);
        measured(&mut state, &menu);
        let mut now = Instant::now();

        for round in 0..6 {
            let expected = round % 2 == 0;
            let update = state.update(SubmenuEvent::TriggerPressed, &ctx, now);
            assert_eq!(update.open_change, Some(expected));
            assert_eq!(state.is_open(), expected);
            now += DURATION;
            let _ = state.update(SubmenuEvent::Tick(now), &ctx, now);
            let phase = if expected {
                TransitionPhase::Open
            } else {
                TransitionPhase::Closed
            };
            assert_eq!(state.phase(), phase);
        }
    }

    #[test]
    fn given_default_open_when_created_then_root_exposes_open_token() {
        let open = SubmenuState::new(true);
        let closed = SubmenuState::new(false);

        assert!(
            open.class_list(MenuItemElement::Root, false, false)
                .contains(MenuClass::Open)
        );
        assert!(
            !closed
                .class_list(MenuItemElement::Root, false, false)
                .contains(MenuClass::Open)
        );
        assert_eq!(open.phase(), TransitionPhase::Open);
        assert_eq!(open.content_height(), ContentHeight::Auto);
        assert_eq!(closed.content_height(), ContentHeight::Px(0.0));
    }

    #[test]
    fn given_controlled_submenu_when_pressed_then_only_change_is_requested() {
        let sidebar = SidebarContext::default();
        let menu = menu();
        let ctx = SubmenuContext::root(&sidebar, &menu);
        let mut state = SubmenuState::controlled(false);
        measured(&mut state, &menu);
        let now = Instant::now();

        let update = state.update(SubmenuEvent::TriggerPressed, &ctx, now);

        assert_eq!(update.open_change, Some(true));
        assert!(!state.is_open());
        assert_eq!(state.phase(), TransitionPhase::Closed);

        let again = state.update(SubmenuEvent::TriggerPressed, &ctx, now);
        assert_eq!(again.open_change, Some(true));

        state.set_open(true, &ctx, now);
        assert!(state.is_open());
        assert_eq!(state.phase(), TransitionPhase::Opening);
    }

    #[test]
    fn given_controlled_value_unchanged_when_pushed_then_no_transition_runs() {
        let sidebar = SidebarContext::default();
        let menu = menu();
        let ctx = SubmenuContext::root(&sidebar, &menu);
        let mut state = SubmenuState::controlled(true);
        measured(&mut state, &menu);

        state.set_open(true, &ctx, Instant::now());

        assert_eq!(state.phase(), TransitionPhase::Open);
        assert!(!state.needs_ticks());
    }

    #[test]
    fn given_focused_trigger_when_keys_released_then_only_enter_toggles() {
        let sidebar = SidebarContext::default();
        let menu = menu();
        let ctx = SubmenuContext::root(&sidebar, &menu);
        let mut state = SubmenuState::new(false);
        let now = Instant::now();

        let unfocused = state.update(
            SubmenuEvent::KeyReleased(keyboard::Key::Named(key::Named::Enter)),
            &ctx,
            now,
        );
        assert_eq!(unfocused.open_change, None);

        let _ = state.update(SubmenuEvent::FocusChanged(true), &ctx, now);
        let space = state.update(
            SubmenuEvent::KeyReleased(keyboard::Key::Named(key::Named::Space)),
            &ctx,
            now,
        );
        let arrow = state.update(
            SubmenuEvent::KeyReleased(keyboard::Key::Named(
                key::Named::ArrowDown,
            )),
            &ctx,
            now,
        );
        assert_eq!(space.open_change, None);
        assert_eq!(arrow.open_change, None);

        let enter = state.update(
            SubmenuEvent::KeyReleased(keyboard::Key::Named(key::Named::Enter)),
            &ctx,
            now,
        );
        assert_eq!(enter.open_change, Some(true));
        assert!(state.is_open());
    }

    #[test]
    fn given_pending_expand_when_unmounted_then_later_ticks_do_not_touch_panel()
    {
        let sidebar = SidebarContext::default();
        let menu = menu();
        let ctx = SubmenuContext::root(&sidebar, &menu);
        let mut state = SubmenuState::new(false);
        measured(&mut state, &menu);
        let start = Instant::now();

        let _ = state.update(SubmenuEvent::TriggerPressed, &ctx, start);
        assert!(state.needs_ticks());
        let height = state.surface().height();

        state.unmount();
        let update = state.update(
            SubmenuEvent::Tick(start + DURATION * 2),
            &ctx,
            start + DURATION * 2,
        );

        assert_eq!(update, Default::default());
        assert_eq!(state.surface().height(), height);
        assert_eq!(state.surface().overflow(), Overflow::Hidden);
        assert!(!state.needs_ticks());
    }

    #[test]
    fn given_hovered_trigger_when_sidebar_collapses_then_flyout_flag_resets() {
        let expanded = SidebarContext::default();
        let collapsed = SidebarContext {
            collapsed: true,
            ..SidebarContext::default()
        };
        let menu = menu();
        let mut state = SubmenuState::new(false);
        let now = Instant::now();

        let ctx = SubmenuContext::root(&expanded, &menu);
        state.sync_context(&ctx, now);
        let _ = state.update(SubmenuEvent::TriggerEntered, &ctx, now);
        assert!(state.is_open_when_collapsed());

        let ctx = SubmenuContext::root(&collapsed, &menu);
        state.sync_context(&ctx, now);

        assert!(!state.is_open_when_collapsed());
    }

    #[test]
    fn given_hover_on_trigger_and_content_when_leaving_both_then_flag_clears() {
        let sidebar = SidebarContext {
            collapsed: true,
            ..SidebarContext::default()
        };
        let menu = menu();
        let ctx = SubmenuContext::root(&sidebar, &menu);
        let mut state = SubmenuState::new(false);
        let now = Instant::now();

        let _ = state.update(SubmenuEvent::TriggerEntered, &ctx, now);
        let _ = state.update(SubmenuEvent::ContentEntered, &ctx, now);
        let _ = state.update(SubmenuEvent::TriggerExited, &ctx, now);
        assert!(state.is_open_when_collapsed());
        assert!(!state.is_open());

        let _ = state.update(SubmenuEvent::ContentExited, &ctx, now);
        assert!(!state.is_open_when_collapsed());
    }

    #[test]
    fn given_trigger_near_corner_when_hovered_then_flyout_flips_left() {
        let sidebar = SidebarContext {
            collapsed: true,
            ..SidebarContext::default()
        };
        let menu = menu();
        let ctx = SubmenuContext::root(&sidebar, &menu);
        let mut state = SubmenuState::new(false);
        let now = Instant::now();
        let positioner = state.positioner_mut();
        positioner.set_trigger_bounds(Rectangle::new(
            Point::new(700.0, 560.0),
            Size::new(80.0, 50.0),
        ));
        positioner.set_content_size(Size::new(200.0, 150.0));
        positioner.set_viewport(Size::new(800.0, 600.0));

        let _ = state.update(SubmenuEvent::TriggerEntered, &ctx, now);
        assert_eq!(state.positioner().placement(), Placement::LeftStart);
        assert_eq!(state.positioner().offset(), Point::new(-205.0, -110.0));

        let _ = state.update(SubmenuEvent::ContentEntered, &ctx, now);
        let _ = state.update(SubmenuEvent::TriggerExited, &ctx, now);
        assert!(state.is_open_when_collapsed());
    }

    #[test]
    fn given_close_on_click_menu_when_content_pressed_then_flyout_hides() {
        let sidebar = SidebarContext {
            collapsed: true,
            ..SidebarContext::default()
        };
        let menu = menu().close_on_click(true);
        let ctx = SubmenuContext::root(&sidebar, &menu);
        let mut state = SubmenuState::new(false);
        let now = Instant::now();

        let _ = state.update(SubmenuEvent::ContentEntered, &ctx, now);
        let _ = state.update(SubmenuEvent::ContentPressed, &ctx, now);

        assert!(!state.is_open_when_collapsed());
    }

    #[test]
    fn given_sidebar_change_when_duration_elapses_then_reposition_fires_once() {
        let sidebar = SidebarContext {
            collapsed: true,
            transition_duration: Duration::from_millis(200),
            ..SidebarContext::default()
        };
        let menu = menu();
        let ctx = SubmenuContext::root(&sidebar, &menu);
        let mut state = SubmenuState::new(false);
        let start = Instant::now();

        state.sync_context(&ctx, start);
        state.sync_context(&ctx, start + Duration::from_millis(50));

        let early = state.update(
            SubmenuEvent::Tick(start + Duration::from_millis(100)),
            &ctx,
            start + Duration::from_millis(100),
        );
        let due = state.update(
            SubmenuEvent::Tick(start + Duration::from_millis(200)),
            &ctx,
            start + Duration::from_millis(200),
        );
        let after = state.update(
            SubmenuEvent::Tick(start + Duration::from_millis(400)),
            &ctx,
            start + Duration::from_millis(400),
        );

        assert!(!early.reposition);
        assert!(due.reposition);
        assert!(!after.reposition);
    }

    #[test]
    fn given_nested_level_when_building_style_params_then_fields_match() {
        let state = SubmenuState::new(true);

        let params = state.style_params(Level::new(2), true, false);

        assert_eq!(params.level.depth(), 2);
        assert!(params.active);
        assert!(!params.disabled);
        assert!(params.is_submenu);
        assert!(params.open);
    }
}
