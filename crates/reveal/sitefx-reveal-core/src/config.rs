//! Configuration for the reveal controller.
//!
//! Every struct is `#[serde(default)]` so hosts can pass partial JSON and get
//! the stock page behaviour for everything they leave out.

use serde::{Deserialize, Serialize};

use crate::error::{RevealError, Result};
use crate::margin::RootMargin;

/// Tolerance for browser-reported ratios that land a hair under a threshold.
pub const RATIO_EPSILON: f64 = 1e-6;

/// Trigger sensitivity for one watcher. Immutable once registered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Fraction of the element that must be visible, in [0, 1].
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::default(),
        }
    }
}

impl WatcherConfig {
    pub fn new(threshold: f64, root_margin: RootMargin) -> Result<Self> {
        let cfg = Self {
            threshold,
            root_margin,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(RevealError::ThresholdOutOfRange {
                threshold: self.threshold,
            });
        }
        Ok(())
    }

    /// Whether a reported visibility state counts as "revealed".
    #[inline]
    pub fn qualifies(&self, is_intersecting: bool, ratio: f64) -> bool {
        is_intersecting && ratio + RATIO_EPSILON >= self.threshold
    }

    fn with(threshold: f64, margin: &str) -> Self {
        Self {
            threshold,
            root_margin: RootMargin::parse(margin).unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeInConfig {
    pub selector: String,
    pub visible_class: String,
    pub watcher: WatcherConfig,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            selector: ".fade-in".into(),
            visible_class: "visible".into(),
            watcher: WatcherConfig::with(0.1, "0px 0px -50px 0px"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyImageConfig {
    pub selector: String,
    /// Attribute holding the deferred source until the image is revealed.
    pub staging_attribute: String,
    /// Attribute the staged source is moved into.
    pub source_attribute: String,
    pub watcher: WatcherConfig,
}

impl Default for LazyImageConfig {
    fn default() -> Self {
        Self {
            selector: "img[data-src]".into(),
            staging_attribute: "data-src".into(),
            source_attribute: "src".into(),
            watcher: WatcherConfig::with(0.0, "50px 0px"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub selector: String,
    /// Class added at registration so timeline items pick up the fade styling.
    pub base_class: String,
    pub visible_class: String,
    /// Delay added per position within one delivered batch.
    pub step_ms: u32,
    pub watcher: WatcherConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            selector: ".timeline-item".into(),
            base_class: "fade-in".into(),
            visible_class: "visible".into(),
            step_ms: 100,
            watcher: WatcherConfig::with(0.2, "0px"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub selector: String,
    pub duration_ms: u32,
    /// Nominal length of one animation frame.
    pub frame_interval_ms: u32,
    pub thousands_separator: String,
    pub watcher: WatcherConfig,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            selector: ".stat-number".into(),
            duration_ms: 2000,
            frame_interval_ms: 16,
            thousands_separator: ",".into(),
            watcher: WatcherConfig::with(0.5, "0px"),
        }
    }
}

/// Full controller configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fade_in: FadeInConfig,
    pub lazy_image: LazyImageConfig,
    pub timeline: TimelineConfig,
    pub counter: CounterConfig,
}

impl Config {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        for (kind, selector, watcher) in [
            ("fade_in", &self.fade_in.selector, &self.fade_in.watcher),
            ("lazy_image", &self.lazy_image.selector, &self.lazy_image.watcher),
            ("timeline", &self.timeline.selector, &self.timeline.watcher),
            ("counter", &self.counter.selector, &self.counter.watcher),
        ] {
            if selector.trim().is_empty() {
                return Err(RevealError::EmptySelector { kind: kind.into() });
            }
            watcher.validate()?;
        }
        if self.counter.frame_interval_ms == 0 {
            return Err(RevealError::ZeroFrameInterval);
        }
        Ok(())
    }
}
