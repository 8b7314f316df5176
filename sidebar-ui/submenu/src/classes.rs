use std::fmt;

use bitflags::bitflags;

use crate::style::MenuItemElement;

/// Stable class tokens emitted for submenu elements and states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuClass {
    MenuItemRoot,
    SubMenuRoot,
    Button,
    Icon,
    Label,
    Prefix,
    Suffix,
    SubMenuContent,
    SubMenuExpandIcon,
    Active,
    Disabled,
    Open,
}

impl MenuClass {
    pub const fn token(self) -> &'static str {
        match self {
            Self::MenuItemRoot => "ps-menuitem-root",
            Self::SubMenuRoot => "ps-submenu-root",
            Self::Button => "ps-menu-button",
            Self::Icon => "ps-menu-icon",
            Self::Label => "ps-menu-label",
            Self::Prefix => "ps-menu-prefix",
            Self::Suffix => "ps-menu-suffix",
            Self::SubMenuContent => "ps-submenu-content",
            Self::SubMenuExpandIcon => "ps-submenu-expand-icon",
            Self::Active => "ps-active",
            Self::Disabled => "ps-disabled",
            Self::Open => "ps-open",
        }
    }

    /// Structural tokens carried by an element regardless of state.
    pub fn for_element(element: MenuItemElement) -> &'static [MenuClass] {
        match element {
            MenuItemElement::Root => &[Self::MenuItemRoot, Self::SubMenuRoot],
            MenuItemElement::Button => &[Self::Button],
            MenuItemElement::Label => &[Self::Label],
            MenuItemElement::Icon => &[Self::Icon],
            MenuItemElement::Prefix => &[Self::Prefix],
            MenuItemElement::Suffix => &[Self::Suffix],
            MenuItemElement::SubMenuContent => &[Self::SubMenuContent],
            MenuItemElement::SubMenuExpandIcon => &[Self::SubMenuExpandIcon],
        }
    }
}

bitflags! {
    /// State modifiers shared by every element of a submenu.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StateFlags: u8 {
        const ACTIVE = 1 << 0;
        const DISABLED = 1 << 1;
        const OPEN = 1 << 2;
    }
}

impl StateFlags {
    pub fn from_state(active: bool, disabled: bool, open: bool) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::ACTIVE, active);
        flags.set(Self::DISABLED, disabled);
        flags.set(Self::OPEN, open);
        flags
    }

    fn classes(self) -> impl Iterator<Item = MenuClass> {
        [
            (Self::ACTIVE, MenuClass::Active),
            (Self::DISABLED, MenuClass::Disabled),
            (Self::OPEN, MenuClass::Open),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, class)| class)
    }
}

/// Ordered class tokens of one rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<MenuClass>,
}

impl ClassList {
    pub fn new(element: MenuItemElement, flags: StateFlags) -> Self {
        let mut classes = MenuClass::for_element(element).to_vec();
        classes.extend(flags.classes());
        Self { classes }
    }

    pub fn contains(&self, class: MenuClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classes.iter().map(|class| class.token())
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}
