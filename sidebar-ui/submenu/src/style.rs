use std::sync::Arc;

use iced::widget::container;
use iced::{Background, Border, Color, Padding, Shadow, Vector};

use crate::context::Level;

/// Height of the trigger button row.
pub const BUTTON_HEIGHT: f32 = 50.0;
/// Horizontal indentation added per nesting level.
pub const LEVEL_INDENT: f32 = 20.0;
/// Width of a hover flyout panel.
pub const FLYOUT_WIDTH: f32 = 200.0;
pub const ICON_SIZE: f32 = 35.0;
pub const ICON_MARGIN: f32 = 10.0;

const HOVER_BACKGROUND: Color = Color {
    r: 0.953,
    g: 0.953,
    b: 0.953,
    a: 1.0,
};
const ACTIVE_BACKGROUND: Color = Color {
    r: 0.886,
    g: 0.933,
    b: 0.976,
    a: 1.0,
};
const DISABLED_TEXT: Color = Color {
    r: 0.678,
    g: 0.678,
    b: 0.678,
    a: 1.0,
};
const FLYOUT_RADIUS: f32 = 4.0;

/// Addressable sub-elements of a submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemElement {
    Root,
    Button,
    Label,
    Icon,
    Prefix,
    Suffix,
    SubMenuContent,
    SubMenuExpandIcon,
}

impl MenuItemElement {
    pub const ALL: [Self; 8] = [
        Self::Root,
        Self::Button,
        Self::Label,
        Self::Icon,
        Self::Prefix,
        Self::Suffix,
        Self::SubMenuContent,
        Self::SubMenuExpandIcon,
    ];
}

/// State snapshot passed to dynamic style entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleParams {
    pub level: Level,
    pub disabled: bool,
    pub active: bool,
    /// Always `true` for submenus; plain menu items report `false`.
    pub is_submenu: bool,
    pub open: bool,
}

/// Visual override for a single sub-element.
///
/// Every field is optional; unset fields leave the built-in look alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemStyle {
    pub background: Option<Color>,
    pub text_color: Option<Color>,
    pub border: Option<Border>,
    pub shadow: Option<Shadow>,
    pub padding: Option<Padding>,
}

impl ItemStyle {
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            background: other.background.or(self.background),
            text_color: other.text_color.or(self.text_color),
            border: other.border.or(self.border),
            shadow: other.shadow.or(self.shadow),
            padding: other.padding.or(self.padding),
        }
    }

    /// Layer an optional override on top of `self`.
    pub fn with_override(self, other: Option<Self>) -> Self {
        match other {
            Some(other) => self.merge(other),
            None => self,
        }
    }

    pub fn container_style(self) -> container::Style {
        container::Style {
            background: self.background.map(Background::from),
            text_color: self.text_color,
            border: self.border.unwrap_or_default(),
            shadow: self.shadow.unwrap_or_default(),
            ..Default::default()
        }
    }
}

type StyleFn = dyn Fn(&StyleParams) -> ItemStyle + Send + Sync;

/// A style map entry: either fixed, or computed from the state snapshot.
#[derive(Clone)]
pub enum ElementStyle {
    Static(ItemStyle),
    Dynamic(Arc<StyleFn>),
}

impl ElementStyle {
    pub fn dynamic(
        style: impl Fn(&StyleParams) -> ItemStyle + Send + Sync + 'static,
    ) -> Self {
        Self::Dynamic(Arc::new(style))
    }

    pub fn resolve(&self, params: &StyleParams) -> ItemStyle {
        match self {
            Self::Static(style) => *style,
            Self::Dynamic(style) => style(params),
        }
    }
}

impl From<ItemStyle> for ElementStyle {
    fn from(style: ItemStyle) -> Self {
        Self::Static(style)
    }
}

impl std::fmt::Debug for ElementStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(style) => {
                f.debug_tuple("Static").field(style).finish()
            },
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Themeable per-element style map shared through the menu context.
#[derive(Debug, Clone, Default)]
pub struct MenuItemStyles {
    root: Option<ElementStyle>,
    button: Option<ElementStyle>,
    label: Option<ElementStyle>,
    icon: Option<ElementStyle>,
    prefix: Option<ElementStyle>,
    suffix: Option<ElementStyle>,
    sub_menu_content: Option<ElementStyle>,
    sub_menu_expand_icon: Option<ElementStyle>,
}

impl MenuItemStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry for `element`, replacing any previous one.
    pub fn with(
        mut self,
        element: MenuItemElement,
        style: impl Into<ElementStyle>,
    ) -> Self {
        *self.slot_mut(element) = Some(style.into());
        self
    }

    /// Set a dynamic entry for `element`.
    pub fn with_fn(
        self,
        element: MenuItemElement,
        style: impl Fn(&StyleParams) -> ItemStyle + Send + Sync + 'static,
    ) -> Self {
        self.with(element, ElementStyle::dynamic(style))
    }

    pub fn get(&self, element: MenuItemElement) -> Option<&ElementStyle> {
        match element {
            MenuItemElement::Root => self.root.as_ref(),
            MenuItemElement::Button => self.button.as_ref(),
            MenuItemElement::Label => self.label.as_ref(),
            MenuItemElement::Icon => self.icon.as_ref(),
            MenuItemElement::Prefix => self.prefix.as_ref(),
            MenuItemElement::Suffix => self.suffix.as_ref(),
            MenuItemElement::SubMenuContent => self.sub_menu_content.as_ref(),
            MenuItemElement::SubMenuExpandIcon => {
                self.sub_menu_expand_icon.as_ref()
            },
        }
    }

    fn slot_mut(
        &mut self,
        element: MenuItemElement,
    ) -> &mut Option<ElementStyle> {
        match element {
            MenuItemElement::Root => &mut self.root,
            MenuItemElement::Button => &mut self.button,
            MenuItemElement::Label => &mut self.label,
            MenuItemElement::Icon => &mut self.icon,
            MenuItemElement::Prefix => &mut self.prefix,
            MenuItemElement::Suffix => &mut self.suffix,
            MenuItemElement::SubMenuContent => &mut self.sub_menu_content,
            MenuItemElement::SubMenuExpandIcon => {
                &mut self.sub_menu_expand_icon
            },
        }
    }
}

/// Resolve the override for `element` from an optional style map.
///
/// Dynamic entries are invoked with `params`; static entries are returned
/// as-is. Missing maps and unset entries resolve to `None`.
pub fn resolve_style(
    styles: Option<&MenuItemStyles>,
    element: MenuItemElement,
    params: &StyleParams,
) -> Option<ItemStyle> {
    styles
        .and_then(|styles| styles.get(element))
        .map(|style| style.resolve(params))
}

/// Trigger padding: indentation grows with nesting and mirrors in RTL.
pub fn button_padding(level: Level, collapsed: bool, rtl: bool) -> Padding {
    let depth = level.depth() as f32;
    let indent = if level.is_top() {
        LEVEL_INDENT
    } else if collapsed {
        depth * LEVEL_INDENT
    } else {
        (depth + 1.0) * LEVEL_INDENT
    };

    if rtl {
        Padding {
            top: 0.0,
            bottom: 0.0,
            left: LEVEL_INDENT,
            right: indent,
        }
    } else {
        Padding {
            top: 0.0,
            bottom: 0.0,
            left: indent,
            right: LEVEL_INDENT,
        }
    }
}

/// Built-in trigger look before any override is applied.
pub fn default_button_style(params: &StyleParams, hovered: bool) -> ItemStyle {
    let mut style = ItemStyle::default();

    if hovered && !params.disabled {
        style.background = Some(HOVER_BACKGROUND);
    }

    if params.disabled {
        style.text_color = Some(DISABLED_TEXT);
    }

    if params.active {
        style.background = Some(ACTIVE_BACKGROUND);
    }

    style
}

/// Built-in look of the content panel.
pub fn default_content_style(flyout: bool) -> ItemStyle {
    let style = ItemStyle::default().background(Color::WHITE);
    if !flyout {
        return style;
    }

    style
        .border(Border {
            radius: FLYOUT_RADIUS.into(),
            ..Border::default()
        })
        .shadow(Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
            offset: Vector::new(0.0, 3.0),
            blur_radius: 6.0,
        })
}
