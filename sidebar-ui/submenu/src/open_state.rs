/// Ownership of a submenu's open flag.
///
/// A controlled submenu only ever *requests* a new value; the owner decides
/// whether to push it back through [`OpenState::set_controlled`]. An
/// uncontrolled submenu flips its own flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    Controlled { open: bool },
    Uncontrolled { open: bool },
}

impl OpenState {
    pub fn controlled(open: bool) -> Self {
        Self::Controlled { open }
    }

    pub fn uncontrolled(default_open: bool) -> Self {
        Self::Uncontrolled { open: default_open }
    }

    pub fn is_open(&self) -> bool {
        match self {
            Self::Controlled { open } | Self::Uncontrolled { open } => *open,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled { .. })
    }

    /// Handle a toggle request and return the requested next value.
    pub fn request_toggle(&mut self) -> bool {
        let next = !self.is_open();
        if let Self::Uncontrolled { open } = self {
            *open = next;
        }
        next
    }

    /// Apply an owner-supplied value, switching to controlled mode if needed.
    ///
    /// Returns `true` when the visible open flag changed.
    pub fn set_controlled(&mut self, open: bool) -> bool {
        let changed = self.is_open() != open;
        *self = Self::Controlled { open };
        changed
    }
}

impl Default for OpenState {
    fn default() -> Self {
        Self::uncontrolled(false)
    }
}
