//! Collapsible, nested sidebar submenu for [`iced`].
//!
//! The crate is split into two layers:
//! - state helpers ([`SubmenuState`], [`OpenState`], [`TransitionDriver`],
//!   [`HoverTracker`]) that reduce [`SubmenuEvent`]s without touching a
//!   renderer;
//! - the view builder [`SubMenu`] that renders a state as a trigger row plus
//!   a content panel, inline or as a hover flyout in a collapsed sidebar.
//!   Flyouts come back as a separate overlay from [`SubMenu::layers`].
//!
//! Sidebar and menu options are shared read-only through [`SidebarContext`]
//! and [`MenuContext`]. A [`SubmenuContext`] bundles both with the nesting
//! [`Level`]; children receive [`SubmenuContext::nested`].
//!
//! The recommended flow:
//! 1. keep one [`SubmenuState`] per submenu node in your app state;
//! 2. call [`SubmenuState::sync_context`] when sidebar options change;
//! 3. route events through [`SubmenuState::update`] and forward
//!    [`SubmenuUpdate::open_change`] to your own open-change handling;
//! 4. batch [`SubmenuState::subscription`] so transitions get frame ticks.
//! 5. in a collapsed sidebar, stack [`SubmenuLayers::flyout`] above the
//!    window and feed trigger bounds to [`SubmenuState::positioner_mut`].
//!
//! See `examples/sidebar.rs` for a complete runnable example.
//!
//! # Quick Example
//!
//! ```no_run
//! use std::time::Instant;
//!
//! use iced::widget::text;
//! use iced::Element;
//! use sidebar_ui_submenu::{
//!     MenuContext, SidebarContext, SubMenu, SubmenuContext, SubmenuEvent,
//!     SubmenuState,
//! };
//!
//! #[derive(Debug, Clone)]
//! enum Message {
//!     Charts(SubmenuEvent),
//! }
//!
//! struct State {
//!     sidebar: SidebarContext,
//!     menu: MenuContext<Message>,
//!     charts: SubmenuState,
//! }
//!
//! fn update(state: &mut State, message: Message) {
//!     match message {
//!         Message::Charts(event) => {
//!             let ctx = SubmenuContext::root(&state.sidebar, &state.menu);
//!             let _ = state.charts.update(event, &ctx, Instant::now());
//!         },
//!     }
//! }
//!
//! fn view(state: &State) -> Element<'_, Message> {
//!     let ctx = SubmenuContext::root(&state.sidebar, &state.menu);
//!     SubMenu::new(&state.charts, text("Charts"), Message::Charts)
//!         .children(|_nested| {
//!             vec![text("Pie").into(), text("Line").into()]
//!         })
//!         .view(ctx)
//! }
//! ```

mod classes;
mod context;
mod error;
mod event;
mod hover;
mod open_state;
mod positioning;
mod settings;
mod state;
mod style;
mod surface;
mod transition;
mod view;

pub use classes::{ClassList, MenuClass, StateFlags};
pub use context::{
    DEFAULT_TRANSITION_DURATION, ExpandIconParams, Level, MenuContext,
    SidebarContext, SubmenuContext,
};
pub use error::SettingsError;
pub use event::{SubmenuEvent, SubmenuUpdate};
pub use hover::HoverTracker;
pub use open_state::OpenState;
pub use positioning::{
    FLYOUT_GAP, FlyoutAnchor, FlyoutPositioner, Placement, Positioner,
    RepositionSchedule,
};
pub use settings::{
    MenuSettings, SettingsData, SettingsLoad, SettingsLoadStatus,
    SidebarSettings, load_settings_from_path, parse_settings,
};
pub use state::{SubmenuState, TICK_INTERVAL};
pub use style::{
    BUTTON_HEIGHT, ElementStyle, FLYOUT_WIDTH, ItemStyle, LEVEL_INDENT,
    MenuItemElement, MenuItemStyles, StyleParams, button_padding,
    default_button_style, default_content_style, resolve_style,
};
pub use surface::PanelSurface;
pub use transition::{
    ContentHeight, ContentSurface, Overflow, TransitionDriver,
    TransitionPhase, TransitionToken,
};
pub use view::{SubMenu, SubmenuLayers};
