/// Open/closed state of the mobile menu. The toggle button and the link list
/// both carry the active class while open.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    /// Seed from the markup, in case the page ships with the menu open.
    pub fn from_markup(open: bool) -> Self {
        Self { open }
    }

    /// Flip the state; returns whether the menu is now open.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
