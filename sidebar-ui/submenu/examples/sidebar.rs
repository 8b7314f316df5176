use std::path::Path;
use std::time::Instant;

use iced::widget::{Column, Space, Stack, button, column, container, row, text};
use iced::{
    Element, Length, Point, Rectangle, Size, Subscription, Theme, keyboard,
    window,
};
use sidebar_ui_submenu::{
    BUTTON_HEIGHT, FLYOUT_WIDTH, Level, MenuContext, SettingsLoadStatus,
    SidebarContext, SubMenu, SubmenuContext, SubmenuEvent, SubmenuState,
    load_settings_from_path,
};

const WINDOW_SIZE: Size = Size {
    width: 1024.0,
    height: 720.0,
};
const EXPANDED_WIDTH: f32 = 250.0;
const COLLAPSED_WIDTH: f32 = 80.0;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("sidebar submenu")
        .window_size(WINDOW_SIZE)
        .subscription(App::subscription)
        .run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Node {
    Charts,
    Maps,
    Regions,
    Theme,
    Archived,
}

impl Node {
    const ALL: [Self; 5] = [
        Self::Charts,
        Self::Maps,
        Self::Regions,
        Self::Theme,
        Self::Archived,
    ];

    fn level(self) -> Level {
        match self {
            Self::Regions => Level::new(1),
            _ => Level::ROOT,
        }
    }

    /// Row index of a top-level trigger inside the sidebar column.
    fn slot(self) -> Option<usize> {
        match self {
            Self::Charts => Some(0),
            Self::Maps => Some(1),
            Self::Theme => Some(2),
            Self::Archived => Some(3),
            Self::Regions => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Message {
    Submenu(Node, SubmenuEvent),
    /// Leaf item pressed; carries the submenus it is nested in.
    LeafPressed(&'static str, &'static [Node]),
    Keyboard(keyboard::Event),
    Window(window::Event),
    ToggleCollapsed,
    ToggleRtl,
    ResetTheme,
}

struct Submenus {
    charts: SubmenuState,
    maps: SubmenuState,
    regions: SubmenuState,
    theme: SubmenuState,
    archived: SubmenuState,
}

impl Submenus {
    fn get(&self, node: Node) -> &SubmenuState {
        match node {
            Node::Charts => &self.charts,
            Node::Maps => &self.maps,
            Node::Regions => &self.regions,
            Node::Theme => &self.theme,
            Node::Archived => &self.archived,
        }
    }

    fn get_mut(&mut self, node: Node) -> &mut SubmenuState {
        match node {
            Node::Charts => &mut self.charts,
            Node::Maps => &mut self.maps,
            Node::Regions => &mut self.regions,
            Node::Theme => &mut self.theme,
            Node::Archived => &mut self.archived,
        }
    }
}

struct App {
    sidebar: SidebarContext,
    menu: MenuContext<Message>,
    submenus: Submenus,
    theme_open: bool,
    last_pressed: Option<&'static str>,
    viewport: Size,
}

impl App {
    fn new() -> Self {
        let settings = match load_settings_from_path(Path::new("sidebar.json"))
        {
            Ok(load) => {
                if let SettingsLoadStatus::Invalid(reason) = load.status() {
                    log::warn!("using default sidebar settings: {reason}");
                }
                load.into_parts().0
            },
            Err(err) => {
                log::warn!("failed to read sidebar settings: {err}");
                Default::default()
            },
        };

        let mut app = Self {
            sidebar: settings.sidebar.to_context(),
            menu: settings.menu.to_context(),
            submenus: Submenus {
                charts: SubmenuState::new(false),
                maps: SubmenuState::new(true),
                regions: SubmenuState::new(false),
                theme: SubmenuState::controlled(false),
                archived: SubmenuState::new(false),
            },
            theme_open: false,
            last_pressed: None,
            viewport: WINDOW_SIZE,
        };

        let now = Instant::now();
        app.measure(now);
        app.sync_contexts(now);
        app
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subs: Vec<Subscription<Message>> = Node::ALL
            .iter()
            .map(|&node| {
                self.submenus
                    .get(node)
                    .subscription()
                    .with(node)
                    .map(|(node, event)| Message::Submenu(node, event))
            })
            .collect();
        subs.push(keyboard::listen().map(Message::Keyboard));
        subs.push(window::events().map(|(_id, event)| Message::Window(event)));

        Subscription::batch(subs)
    }

    fn update(&mut self, message: Message) {
        let now = Instant::now();

        match message {
            Message::Submenu(node, event) => {
                if matches!(event, SubmenuEvent::TriggerPressed) {
                    self.blur_except(node, now);
                }
                self.dispatch(node, event, now);
            },
            Message::LeafPressed(label, ancestors) => {
                self.last_pressed = Some(label);
                for &node in ancestors {
                    self.dispatch(node, SubmenuEvent::ContentPressed, now);
                }
            },
            Message::Keyboard(keyboard::Event::KeyReleased { key, .. }) => {
                for node in Node::ALL {
                    self.dispatch(
                        node,
                        SubmenuEvent::KeyReleased(key.clone()),
                        now,
                    );
                }
            },
            Message::Keyboard(_) => {},
            Message::Window(window::Event::Resized(size)) => {
                self.viewport = size;
                self.sync_contexts(now);
            },
            Message::Window(_) => {},
            Message::ToggleCollapsed => {
                self.sidebar.collapsed = !self.sidebar.collapsed;
                self.sync_contexts(now);
            },
            Message::ToggleRtl => {
                self.sidebar.rtl = !self.sidebar.rtl;
                self.sync_contexts(now);
            },
            Message::ResetTheme => {
                self.theme_open = false;
                let ctx = SubmenuContext {
                    sidebar: &self.sidebar,
                    menu: &self.menu,
                    level: Node::Theme.level(),
                };
                self.submenus.theme.set_open(false, &ctx, now);
            },
        }

        self.measure(now);
    }

    fn view(&self) -> Element<'_, Message> {
        let ctx = SubmenuContext::root(&self.sidebar, &self.menu);

        let charts = SubMenu::new(&self.submenus.charts, text("Charts"), |e| {
            Message::Submenu(Node::Charts, e)
        })
        .icon(text("C"))
        .suffix(text("3"))
        .title("Charts")
        .children(|_| {
            leaves(&["Pie charts", "Line charts", "Bar charts"], &[
                Node::Charts,
            ])
        })
        .layers(ctx);

        let maps = SubMenu::new(&self.submenus.maps, text("Maps"), |e| {
            Message::Submenu(Node::Maps, e)
        })
        .icon(text("M"))
        .active(
            self.last_pressed
                .is_some_and(|label| label.ends_with("maps")),
        )
        .children(move |nested| {
            let mut items =
                leaves(&["Google maps", "Open street maps"], &[Node::Maps]);
            items.push(
                SubMenu::new(&self.submenus.regions, text("Regions"), |e| {
                    Message::Submenu(Node::Regions, e)
                })
                .children(|_| {
                    leaves(&["Europe", "Asia"], &[Node::Maps, Node::Regions])
                })
                .view(nested),
            );
            items
        })
        .layers(ctx);

        let theme = SubMenu::new(&self.submenus.theme, text("Theme"), |e| {
            Message::Submenu(Node::Theme, e)
        })
        .icon(text("T"))
        .prefix(text(if self.theme_open { "on " } else { "off " }))
        .children(|_| leaves(&["Dark", "Light"], &[Node::Theme]))
        .layers(ctx);

        let archived =
            SubMenu::new(&self.submenus.archived, text("Archived"), |e| {
                Message::Submenu(Node::Archived, e)
            })
            .icon(text("A"))
            .disabled(true)
            .children(|_| leaves(&["2023"], &[Node::Archived]))
            .layers(ctx);

        let mut items = Column::new();
        let mut flyouts = Vec::new();
        for layers in [charts, maps, theme, archived] {
            items = items.push(layers.item);
            flyouts.extend(layers.flyout);
        }

        let sidebar = container(items)
            .width(Length::Fixed(self.sidebar_width()))
            .height(Length::Fill)
            .style(|theme: &Theme| {
                let palette = theme.extended_palette();
                container::Style {
                    background: Some(palette.background.weak.color.into()),
                    ..Default::default()
                }
            });

        let controls = column![
            button(text(if self.sidebar.collapsed {
                "Expand sidebar"
            } else {
                "Collapse sidebar"
            }))
            .on_press(Message::ToggleCollapsed),
            button(text(if self.sidebar.rtl { "LTR" } else { "RTL" }))
                .on_press(Message::ToggleRtl),
            button(text("Close theme")).on_press(Message::ResetTheme),
            text(format!(
                "last pressed: {}",
                self.last_pressed.unwrap_or("none")
            )),
        ]
        .spacing(10)
        .padding(20);

        let layout = if self.sidebar.rtl {
            row![controls, Space::new().width(Length::Fill), sidebar]
        } else {
            row![sidebar, controls]
        };

        let base: Element<'_, Message> = container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        Stack::with_children(std::iter::once(base).chain(flyouts))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn dispatch(&mut self, node: Node, event: SubmenuEvent, now: Instant) {
        let ctx = SubmenuContext {
            sidebar: &self.sidebar,
            menu: &self.menu,
            level: node.level(),
        };
        let update = self.submenus.get_mut(node).update(event, &ctx, now);

        if let Some(open) = update.open_change {
            log::info!("{node:?} open change requested: {open}");
            if node == Node::Theme {
                self.theme_open = open;
                self.submenus.theme.set_open(open, &ctx, now);
            }
        }
        if update.reposition {
            log::debug!(
                "{node:?} flyout repositioned to {:?}",
                self.submenus.get(node).positioner().position()
            );
        }
    }

    fn blur_except(&mut self, focused: Node, now: Instant) {
        for node in Node::ALL.into_iter().filter(|&node| node != focused) {
            self.dispatch(node, SubmenuEvent::FocusChanged(false), now);
        }
    }

    /// Push sidebar options and trigger geometry, in window coordinates, to
    /// every submenu.
    fn sync_contexts(&mut self, now: Instant) {
        let width = self.sidebar_width();
        let x = if self.sidebar.rtl {
            self.viewport.width - width
        } else {
            0.0
        };
        for node in Node::ALL {
            let ctx = SubmenuContext {
                sidebar: &self.sidebar,
                menu: &self.menu,
                level: node.level(),
            };
            let content_height = rows(&self.submenus, node) * BUTTON_HEIGHT;
            let state = self.submenus.get_mut(node);
            if let Some(slot) = node.slot() {
                let positioner = state.positioner_mut();
                positioner.set_trigger_bounds(Rectangle::new(
                    Point::new(x, slot as f32 * BUTTON_HEIGHT),
                    Size::new(width, BUTTON_HEIGHT),
                ));
                positioner.set_content_size(Size::new(
                    FLYOUT_WIDTH,
                    content_height,
                ));
                positioner.set_viewport(self.viewport);
            }
            state.sync_context(&ctx, now);
        }
    }

    fn measure(&mut self, now: Instant) {
        for node in Node::ALL {
            let height = rows(&self.submenus, node) * BUTTON_HEIGHT;
            self.dispatch(node, SubmenuEvent::ContentMeasured(height), now);
        }
    }

    fn sidebar_width(&self) -> f32 {
        if self.sidebar.collapsed {
            COLLAPSED_WIDTH
        } else {
            EXPANDED_WIDTH
        }
    }
}

/// Natural row count of a submenu's content.
fn rows(submenus: &Submenus, node: Node) -> f32 {
    match node {
        Node::Charts => 3.0,
        Node::Maps => {
            let regions = if submenus.regions.is_open() { 2.0 } else { 0.0 };
            3.0 + regions
        },
        Node::Regions | Node::Theme => 2.0,
        Node::Archived => 1.0,
    }
}

fn leaves<'a>(
    labels: &[&'static str],
    ancestors: &'static [Node],
) -> Vec<Element<'a, Message>> {
    labels
        .iter()
        .map(|&label| {
            button(text(label))
                .width(Length::Fill)
                .height(Length::Fixed(BUTTON_HEIGHT))
                .style(|_, _| button::Style::default())
                .on_press(Message::LeafPressed(label, ancestors))
                .into()
        })
        .collect()
}
