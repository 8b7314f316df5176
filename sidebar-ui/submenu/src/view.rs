use iced::widget::{Column, Row, Space, container, mouse_area, text, tooltip};
use iced::{Element, Length, Padding, alignment, mouse};

use crate::context::{ExpandIconParams, SubmenuContext};
use crate::event::SubmenuEvent;
use crate::state::SubmenuState;
use crate::style::{
    BUTTON_HEIGHT, FLYOUT_WIDTH, ICON_MARGIN, ICON_SIZE, ItemStyle,
    MenuItemElement, StyleParams, button_padding, default_button_style,
    default_content_style, resolve_style,
};
use crate::transition::{ContentHeight, Overflow};

type EventMapper<'a, Message> = dyn Fn(SubmenuEvent) -> Message + 'a;
type TriggerWrapper<'a, Message> =
    dyn FnOnce(Element<'a, Message>) -> Element<'a, Message> + 'a;
type Items<'a, Message> = Vec<Element<'a, Message>>;
type ChildrenRenderer<'a, Message> =
    dyn FnOnce(SubmenuContext<'a, Message>) -> Items<'a, Message> + 'a;

/// Rendered submenu: the inline item and an optional flyout overlay.
///
/// Stack `flyout` above the rest of the window; its coordinates are the
/// ones fed to [`SubmenuState::positioner_mut`].
pub struct SubmenuLayers<'a, Message> {
    pub item: Element<'a, Message>,
    pub flyout: Option<Element<'a, Message>>,
}

/// View builder rendering a [`SubmenuState`] as a trigger row plus a
/// collapsible content panel.
pub struct SubMenu<'a, Message> {
    state: &'a SubmenuState,
    label: Element<'a, Message>,
    icon: Option<Element<'a, Message>>,
    prefix: Option<Element<'a, Message>>,
    suffix: Option<Element<'a, Message>>,
    active: bool,
    disabled: bool,
    title: Option<String>,
    root_styles: Option<ItemStyle>,
    component: Option<Box<TriggerWrapper<'a, Message>>>,
    children: Option<Box<ChildrenRenderer<'a, Message>>>,
    on_event: Box<EventMapper<'a, Message>>,
}

impl<'a, Message> SubMenu<'a, Message>
where
    Message: Clone + 'a,
{
    /// Create a submenu view; `on_event` maps widget events into app
    /// messages addressed to `state`.
    pub fn new(
        state: &'a SubmenuState,
        label: impl Into<Element<'a, Message>>,
        on_event: impl Fn(SubmenuEvent) -> Message + 'a,
    ) -> Self {
        Self {
            state,
            label: label.into(),
            icon: None,
            prefix: None,
            suffix: None,
            active: false,
            disabled: false,
            title: None,
            root_styles: None,
            component: None,
            children: None,
            on_event: Box::new(on_event),
        }
    }

    pub fn icon(mut self, icon: impl Into<Element<'a, Message>>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Content shown before the label; hidden in a collapsed sidebar.
    pub fn prefix(mut self, prefix: impl Into<Element<'a, Message>>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Content shown after the label; hidden in a collapsed sidebar.
    pub fn suffix(mut self, suffix: impl Into<Element<'a, Message>>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Disabled triggers ignore pointer presses.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Tooltip shown while hovering the trigger.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Per-instance override layered over the menu's root style.
    pub fn root_styles(mut self, style: ItemStyle) -> Self {
        self.root_styles = Some(style);
        self
    }

    /// Wrap the trigger row in a custom element.
    pub fn component(
        mut self,
        wrap: impl FnOnce(Element<'a, Message>) -> Element<'a, Message> + 'a,
    ) -> Self {
        self.component = Some(Box::new(wrap));
        self
    }

    /// Render nested items; the closure receives the context of the next
    /// nesting level.
    pub fn children<F>(mut self, children: F) -> Self
    where
        F: FnOnce(SubmenuContext<'a, Message>) -> Items<'a, Message> + 'a,
    {
        self.children = Some(Box::new(children));
        self
    }

    /// Build the inline `Element` for the submenu.
    ///
    /// A top-level item in a collapsed sidebar renders its content as a
    /// flyout overlay; use [`Self::layers`] to receive it.
    pub fn view(
        self,
        ctx: SubmenuContext<'a, Message>,
    ) -> Element<'a, Message> {
        self.layers(ctx).item
    }

    /// Build the inline item plus the flyout overlay layer, if visible.
    pub fn layers(
        mut self,
        ctx: SubmenuContext<'a, Message>,
    ) -> SubmenuLayers<'a, Message> {
        let flyout = ctx.is_flyout();
        let params =
            self.state
                .style_params(ctx.level, self.active, self.disabled);
        let styles = ctx.menu.styles();
        let resolve =
            |element: MenuItemElement| resolve_style(styles, element, &params);

        let trigger = self.trigger(&ctx, &params, flyout, &resolve);

        let items = match self.children {
            Some(children) => children(ctx.nested()),
            None => Vec::new(),
        };
        let content_style = resolve(MenuItemElement::SubMenuContent);
        let root_style = resolve(MenuItemElement::Root)
            .unwrap_or_default()
            .with_override(self.root_styles);

        if flyout {
            let layer = flyout_layer(
                self.state,
                items,
                content_style,
                &*self.on_event,
            );
            return SubmenuLayers {
                item: styled(trigger, root_style, Length::Fill),
                flyout: layer,
            };
        }

        let panel =
            inline_panel(self.state, items, content_style, &*self.on_event);
        let body = Column::new().push(trigger).push(panel);
        SubmenuLayers {
            item: styled(body, root_style, Length::Fill),
            flyout: None,
        }
    }

    fn trigger(
        &mut self,
        ctx: &SubmenuContext<'a, Message>,
        params: &StyleParams,
        flyout: bool,
        resolve: &dyn Fn(MenuItemElement) -> Option<ItemStyle>,
    ) -> Element<'a, Message> {
        let rtl = ctx.sidebar.rtl;
        let mut parts: Vec<Element<'a, Message>> = Vec::new();

        if let Some(icon) = self.icon.take() {
            let margin = if rtl {
                Padding {
                    left: ICON_MARGIN,
                    ..Padding::ZERO
                }
            } else {
                Padding {
                    right: ICON_MARGIN,
                    ..Padding::ZERO
                }
            };
            let slot = container(icon)
                .width(Length::Fixed(ICON_SIZE))
                .height(Length::Fixed(ICON_SIZE))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center);
            let slot = styled(
                slot,
                ItemStyle::default()
                    .with_override(resolve(MenuItemElement::Icon)),
                Length::Shrink,
            );
            parts.push(container(slot).padding(margin).into());
        }

        if let Some(prefix) = self.prefix.take() {
            if !flyout {
                parts.push(styled(
                    prefix,
                    ItemStyle::default()
                        .with_override(resolve(MenuItemElement::Prefix)),
                    Length::Shrink,
                ));
            }
        }

        let label = std::mem::replace(&mut self.label, Space::new().into());
        parts.push(styled(
            label,
            ItemStyle::default().with_override(resolve(MenuItemElement::Label)),
            Length::Fill,
        ));

        if let Some(suffix) = self.suffix.take() {
            if !flyout {
                parts.push(styled(
                    suffix,
                    ItemStyle::default()
                        .with_override(resolve(MenuItemElement::Suffix)),
                    Length::Shrink,
                ));
            }
        }

        let indicator = expand_indicator(
            ctx,
            ExpandIconParams {
                level: params.level,
                disabled: params.disabled,
                active: params.active,
                open: params.open,
            },
            flyout,
        );
        parts.push(styled(
            indicator,
            ItemStyle::default()
                .with_override(resolve(MenuItemElement::SubMenuExpandIcon)),
            Length::Shrink,
        ));

        if rtl {
            parts.reverse();
        }

        let button_style =
            default_button_style(params, self.state.is_trigger_hovered())
                .with_override(resolve(MenuItemElement::Button));
        let padding = button_style.padding.unwrap_or_else(|| {
            button_padding(params.level, ctx.sidebar.collapsed, rtl)
        });

        let content = Row::with_children(parts)
            .spacing(0)
            .height(Length::Fill)
            .align_y(alignment::Vertical::Center);
        let trigger: Element<'a, Message> = container(content)
            .padding(padding)
            .width(Length::Fill)
            .height(Length::Fixed(BUTTON_HEIGHT))
            .style(move |_| button_style.container_style())
            .into();

        let trigger = match self.component.take() {
            Some(wrap) => wrap(trigger),
            None => trigger,
        };

        let mut area = mouse_area(trigger)
            .on_enter((self.on_event)(SubmenuEvent::TriggerEntered))
            .on_exit((self.on_event)(SubmenuEvent::TriggerExited));
        if !self.disabled {
            area = area
                .on_press((self.on_event)(SubmenuEvent::TriggerPressed))
                .interaction(mouse::Interaction::Pointer);
        }

        match self.title.take() {
            Some(title) => {
                let position = if rtl {
                    tooltip::Position::Left
                } else {
                    tooltip::Position::Right
                };
                tooltip(area, text(title), position).into()
            },
            None => area.into(),
        }
    }
}

fn inline_panel<'a, Message: Clone + 'a>(
    state: &SubmenuState,
    items: Items<'a, Message>,
    style: Option<ItemStyle>,
    on_event: &dyn Fn(SubmenuEvent) -> Message,
) -> Element<'a, Message> {
    let list = Column::with_children(items).width(Length::Fill);
    let style = default_content_style(false).with_override(style);

    let (height, clip) = match state.content_height() {
        ContentHeight::Auto => {
            (Length::Shrink, state.surface().overflow() == Overflow::Hidden)
        },
        ContentHeight::Px(height) => (Length::Fixed(height), true),
    };
    let panel = container(list)
        .width(Length::Fill)
        .height(height)
        .clip(clip);

    hoverable(styled(panel, style, Length::Fill), on_event)
}

/// Flyout anchored in viewport coordinates, meant for a `stack` layer
/// covering the window.
///
/// The gap towards the trigger is padding inside the hover area, so moving
/// from the trigger into the panel never crosses an unhovered strip.
fn flyout_layer<'a, Message: Clone + 'a>(
    state: &SubmenuState,
    items: Items<'a, Message>,
    style: Option<ItemStyle>,
    on_event: &dyn Fn(SubmenuEvent) -> Message,
) -> Option<Element<'a, Message>> {
    if !state.is_open_when_collapsed() {
        return None;
    }

    let anchor = state.positioner().anchor();
    let list = Column::with_children(items).width(Length::Fill);
    let style = default_content_style(true).with_override(style);
    let panel = container(styled(list, style, Length::Fixed(FLYOUT_WIDTH)))
        .padding(anchor.gap);

    Some(
        container(hoverable(panel, on_event))
            .padding(Padding {
                top: anchor.origin.y,
                left: anchor.origin.x,
                ..Padding::ZERO
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Left)
            .align_y(alignment::Vertical::Top)
            .into(),
    )
}

fn hoverable<'a, Message: Clone + 'a>(
    content: impl Into<Element<'a, Message>>,
    on_event: &dyn Fn(SubmenuEvent) -> Message,
) -> Element<'a, Message> {
    mouse_area(content)
        .on_enter(on_event(SubmenuEvent::ContentEntered))
        .on_exit(on_event(SubmenuEvent::ContentExited))
        .on_press(on_event(SubmenuEvent::ContentPressed))
        .into()
}

fn expand_indicator<'a, Message: 'a>(
    ctx: &SubmenuContext<'a, Message>,
    params: ExpandIconParams,
    flyout: bool,
) -> Element<'a, Message> {
    if let Some(icon) = ctx.menu.expand_icon(params) {
        return icon;
    }

    let glyph = if flyout {
        "•"
    } else if params.open {
        "▾"
    } else if ctx.sidebar.rtl {
        "◂"
    } else {
        "▸"
    };
    text(glyph).into()
}

fn styled<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    style: ItemStyle,
    width: Length,
) -> Element<'a, Message> {
    let mut styled = container(content)
        .width(width)
        .style(move |_| style.container_style());
    if let Some(padding) = style.padding {
        styled = styled.padding(padding);
    }
    styled.into()
}
