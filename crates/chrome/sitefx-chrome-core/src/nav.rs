//! Navigation bar styling driven by scroll position.

use serde::{Deserialize, Serialize};

use crate::config::NavConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavStyle {
    Transparent,
    Solid,
    Light,
}

/// Vertical extent of an element relative to the viewport top.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerticalSpan {
    pub top: f64,
    pub bottom: f64,
}

/// Whether `span` straddles the horizontal probe line.
pub fn straddles(span: VerticalSpan, probe_line_px: f64) -> bool {
    span.top < probe_line_px && span.bottom > probe_line_px
}

/// Pick the nav style. `light_section` is the light section's span in
/// viewport coordinates, `None` when the page has none.
pub fn nav_style(
    cfg: &NavConfig,
    scroll_y: f64,
    viewport_height: f64,
    light_section: Option<VerticalSpan>,
) -> NavStyle {
    if scroll_y <= cfg.solid_after_px {
        return NavStyle::Transparent;
    }
    let over_light = light_section.is_some_and(|s| straddles(s, cfg.probe_line_px));
    if over_light && scroll_y > viewport_height * cfg.light_after_viewport_fraction {
        NavStyle::Light
    } else {
        NavStyle::Solid
    }
}

/// Class edits that put the nav into a style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassEdits {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl NavStyle {
    pub fn class_edits(self, cfg: &NavConfig) -> ClassEdits {
        let (t, s, l) = (
            cfg.transparent_class.clone(),
            cfg.solid_class.clone(),
            cfg.light_class.clone(),
        );
        match self {
            NavStyle::Transparent => ClassEdits {
                add: vec![t],
                remove: vec![s, l],
            },
            NavStyle::Solid => ClassEdits {
                add: vec![s],
                remove: vec![t, l],
            },
            NavStyle::Light => ClassEdits {
                add: vec![l],
                remove: vec![t, s],
            },
        }
    }
}
