use std::time::{Duration, Instant};

use sidebar_ui_submenu::{
    ContentHeight, Level, MenuClass, MenuContext, MenuItemElement, Overflow,
    SidebarContext, SubmenuContext, SubmenuEvent, SubmenuState,
    TransitionPhase,
};

const DURATION: Duration = Duration::from_millis(250);
const NATURAL_HEIGHT: f32 = 150.0;

fn menu() -> MenuContext<()> {
    MenuContext::new().transition_duration(DURATION)
}

#[test]
fn given_closed_submenu_when_clicked_twice_then_height_runs_two_phases() {
    let sidebar = SidebarContext::default();
    let menu = menu();
    let ctx = SubmenuContext::root(&sidebar, &menu);
    let mut state = SubmenuState::new(false);
    let start = Instant::now();

    let _ = state.update(
        SubmenuEvent::ContentMeasured(NATURAL_HEIGHT),
        &ctx,
        start,
    );
    assert_eq!(state.phase(), TransitionPhase::Closed);
    assert_eq!(state.surface().height(), ContentHeight::Px(0.0));

    let update = state.update(SubmenuEvent::TriggerPressed, &ctx, start);
    assert_eq!(update.open_change, Some(true));
    assert_eq!(state.phase(), TransitionPhase::Opening);
    assert_eq!(
        state.surface().height(),
        ContentHeight::Px(NATURAL_HEIGHT)
    );
    assert_eq!(state.surface().overflow(), Overflow::Hidden);
    assert!(state.needs_ticks());

    let early = start + DURATION / 2;
    let _ = state.update(SubmenuEvent::Tick(early), &ctx, early);
    assert_eq!(state.phase(), TransitionPhase::Opening);

    let done = start + DURATION;
    let _ = state.update(SubmenuEvent::Tick(done), &ctx, done);
    assert_eq!(state.phase(), TransitionPhase::Open);
    assert_eq!(state.surface().height(), ContentHeight::Auto);
    assert_eq!(state.surface().overflow(), Overflow::Auto);

    let update = state.update(SubmenuEvent::TriggerPressed, &ctx, done);
    assert_eq!(update.open_change, Some(false));
    assert_eq!(state.phase(), TransitionPhase::Closed);
    assert_eq!(state.surface().height(), ContentHeight::Px(0.0));
    assert_eq!(state.surface().overflow(), Overflow::Hidden);
    assert_eq!(
        state.content_height(),
        ContentHeight::Px(NATURAL_HEIGHT),
        "collapse animates from the measured height"
    );
}

#[test]
fn given_default_open_submenu_then_open_class_is_reported() {
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
}

#[test]
fn given_controlled_submenu_when_owner_follows_request_then_panel_opens() {
    let sidebar = SidebarContext::default();
    let menu = menu();
    let ctx = SubmenuContext::root(&sidebar, &menu);
    let mut state = SubmenuState::controlled(false);
    let now = Instant::now();
    let _ = state.update(
        SubmenuEvent::ContentMeasured(NATURAL_HEIGHT),
        &ctx,
        now,
    );

    let update = state.update(SubmenuEvent::TriggerPressed, &ctx, now);
    assert_eq!(update.open_change, Some(true));
    assert!(!state.is_open());
    assert_eq!(state.phase(), TransitionPhase::Closed);

    state.set_open(true, &ctx, now);
    assert!(state.is_open());
    assert_eq!(state.phase(), TransitionPhase::Opening);
}

#[test]
fn given_nested_context_then_each_level_reports_its_depth() {
    let sidebar = SidebarContext {
        collapsed: true,
        ..SidebarContext::default()
    };
    let menu = menu();
    let root = SubmenuContext::root(&sidebar, &menu);
    let child = root.nested();
    let grandchild = child.nested();

    assert_eq!(root.level, Level::ROOT);
    assert_eq!(child.level, Level::new(1));
    assert_eq!(grandchild.level, Level::new(2));
    assert!(root.is_flyout());
    assert!(!child.is_flyout());
}

#[test]
fn given_collapsed_sidebar_when_hovered_then_flyout_follows_pointer() {
    let mut sidebar = SidebarContext::default();
    let menu = menu().close_on_click(true);
    let mut state = SubmenuState::new(false);
    let now = Instant::now();

    sidebar.collapsed = true;
    let ctx = SubmenuContext::root(&sidebar, &menu);
    state.sync_context(&ctx, now);

    let _ = state.update(SubmenuEvent::TriggerEntered, &ctx, now);
    assert!(state.is_open_when_collapsed());
    let _ = state.update(SubmenuEvent::ContentEntered, &ctx, now);
    let _ = state.update(SubmenuEvent::TriggerExited, &ctx, now);
    assert!(state.is_open_when_collapsed());
    let _ = state.update(SubmenuEvent::ContentPressed, &ctx, now);
    assert!(!state.is_open_when_collapsed());
    assert!(!state.is_open());
}

#[test]
fn given_pending_transition_when_unmounted_then_later_ticks_do_nothing() {
    let sidebar = SidebarContext::default();
    let menu = menu();
    let ctx = SubmenuContext::root(&sidebar, &menu);
    let mut state = SubmenuState::new(false);
    let start = Instant::now();
    let _ = state.update(
        SubmenuEvent::ContentMeasured(NATURAL_HEIGHT),
        &ctx,
        start,
    );
    let _ = state.update(SubmenuEvent::TriggerPressed, &ctx, start);

    state.unmount();
    let later = start + DURATION * 2;
    let update = state.update(SubmenuEvent::Tick(later), &ctx, later);

    assert_eq!(update.open_change, None);
    assert!(!state.needs_ticks());
    assert_eq!(
        state.surface().height(),
        ContentHeight::Px(NATURAL_HEIGHT)
    );
}
