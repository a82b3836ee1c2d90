//! In-page anchor clicks.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnchorAction {
    /// Let the browser handle the click.
    Ignore,
    /// Suppress the default jump; the fragment has no target.
    PreventOnly,
    /// Suppress the default jump and scroll smoothly to `top`.
    ScrollTo { top: f64 },
}

/// Decide what a click on an anchor with `href` does.
///
/// `target_top` is the target's top relative to the viewport (`None` when
/// nothing matches the fragment); `nav_height` is 0 without a nav bar.
pub fn anchor_action(
    href: &str,
    target_top: Option<f64>,
    scroll_y: f64,
    nav_height: f64,
) -> AnchorAction {
    if href == "#" {
        return AnchorAction::Ignore;
    }
    match target_top {
        Some(top) => AnchorAction::ScrollTo {
            top: top + scroll_y - nav_height,
        },
        None => {
            debug!(%href, "anchor target not found");
            AnchorAction::PreventOnly
        }
    }
}

impl AnchorAction {
    pub fn prevents_default(self) -> bool {
        !matches!(self, AnchorAction::Ignore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_ignored() {
        let action = anchor_action("#", Some(10.0), 0.0, 0.0);
        assert_eq!(action, AnchorAction::Ignore);
        assert!(!action.prevents_default());
    }

    #[test]
    fn scroll_target_accounts_for_nav() {
        assert_eq!(
            anchor_action("#contact", Some(350.0), 1200.0, 80.0),
            AnchorAction::ScrollTo { top: 1470.0 }
        );
    }

    #[test]
    fn missing_target_still_prevents_default() {
        let action = anchor_action("#nowhere", None, 0.0, 80.0);
        assert_eq!(action, AnchorAction::PreventOnly);
        assert!(action.prevents_default());
    }
}
