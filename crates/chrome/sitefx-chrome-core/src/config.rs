//! Selectors, classes and constants for the page chrome behaviours.
//!
//! All structs are `#[serde(default)]`; a host can override any subset.

use serde::{Deserialize, Serialize};

use crate::error::{ChromeError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub selector: String,
    /// Scroll offset past which the nav leaves its transparent style.
    pub solid_after_px: f64,
    pub light_section_selector: String,
    /// Viewport line the light section must straddle.
    pub probe_line_px: f64,
    /// Fraction of the viewport height that must be scrolled before the
    /// light style applies.
    pub light_after_viewport_fraction: f64,
    pub transparent_class: String,
    pub solid_class: String,
    pub light_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            selector: "nav".into(),
            solid_after_px: 100.0,
            light_section_selector: ".section-light".into(),
            probe_line_px: 100.0,
            light_after_viewport_fraction: 0.5,
            transparent_class: "transparent".into(),
            solid_class: "solid".into(),
            light_class: "light".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub selector: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            selector: r##"a[href^="#"]"##.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveLinkConfig {
    pub selector: String,
    pub active_class: String,
    /// Page assumed when the path ends in `/`.
    pub index_page: String,
}

impl Default for ActiveLinkConfig {
    fn default() -> Self {
        Self {
            selector: ".nav-links a".into(),
            active_class: "active".into(),
            index_page: "index.html".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub toggle_selector: String,
    pub menu_selector: String,
    pub active_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle_selector: ".menu-toggle".into(),
            menu_selector: ".nav-links".into(),
            active_class: "active".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub selector: String,
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            selector: ".hero-background img, .page-header-background img".into(),
            factor: 0.3,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub nav: NavConfig,
    pub anchor: AnchorConfig,
    pub active_link: ActiveLinkConfig,
    pub menu: MenuConfig,
    pub parallax: ParallaxConfig,
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ChromeError::NonFinite {
            field: field.into(),
            value,
        });
    }
    if value < 0.0 {
        return Err(ChromeError::NegativeDistance {
            field: field.into(),
            value,
        });
    }
    Ok(())
}

fn selector(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ChromeError::EmptySelector { what: what.into() });
    }
    Ok(())
}

impl ChromeConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("nav.solid_after_px", self.nav.solid_after_px)?;
        non_negative("nav.probe_line_px", self.nav.probe_line_px)?;
        non_negative(
            "nav.light_after_viewport_fraction",
            self.nav.light_after_viewport_fraction,
        )?;
        if !self.parallax.factor.is_finite() {
            return Err(ChromeError::NonFinite {
                field: "parallax.factor".into(),
                value: self.parallax.factor,
            });
        }
        selector("nav", &self.nav.selector)?;
        selector("anchors", &self.anchor.selector)?;
        selector("active link", &self.active_link.selector)?;
        selector("menu toggle", &self.menu.toggle_selector)?;
        selector("menu", &self.menu.menu_selector)?;
        selector("parallax", &self.parallax.selector)?;
        Ok(())
    }
}
