//! One-shot gate shared by every reveal strategy.

use serde::{Deserialize, Serialize};

/// A flag that can go from closed to fired exactly once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    pub const fn new() -> Self {
        Self { fired: false }
    }

    /// Returns `true` only on the first call.
    #[inline]
    #[must_use]
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once() {
        let mut gate = OneShot::new();
        assert!(!gate.has_fired());
        assert!(gate.fire());
        assert!(!gate.fire());
        assert!(!gate.fire());
        assert!(gate.has_fired());
    }
}
