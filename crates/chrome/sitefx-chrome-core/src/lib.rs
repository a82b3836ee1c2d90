//! sitefx page chrome (host-agnostic)
//!
//! Pure decisions for the scroll- and click-driven bits of the site around
//! the reveal pipeline. The wasm adapter reads the DOM, asks these functions
//! what to do and applies the answer.

pub mod active_link;
pub mod anchor;
pub mod config;
pub mod error;
pub mod menu;
pub mod nav;
pub mod parallax;

pub use active_link::{current_page, is_active};
pub use anchor::{anchor_action, AnchorAction};
pub use config::{
    ActiveLinkConfig, AnchorConfig, ChromeConfig, MenuConfig, NavConfig, ParallaxConfig,
};
pub use error::ChromeError;
pub use menu::MenuState;
pub use nav::{nav_style, straddles, ClassEdits, NavStyle, VerticalSpan};
