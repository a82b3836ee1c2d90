//! sitefx reveal core (host-agnostic)
//!
//! Viewport-driven reveal pipeline: watchers register page elements, hosts
//! feed visibility batches and animation frames in, and the controller hands
//! back the DOM effects to apply. Each element reveals at most once.
//!
//! Four strategies share the one watcher mechanism: fade-in, lazy image,
//! timeline stagger and counter animation.

pub mod config;
pub mod controller;
pub mod counter;
pub mod document;
pub mod error;
pub mod gate;
pub mod geometry;
pub mod ids;
pub mod margin;
pub mod outputs;
pub mod strategy;

// Re-exports for consumers (adapters)
pub use config::{
    Config, CounterConfig, FadeInConfig, LazyImageConfig, TimelineConfig, WatcherConfig,
};
pub use controller::{ViewportRevealController, Watcher, REGISTRATION_ORDER};
pub use counter::{format_thousands, parse_counter_text, CounterAnimation, CounterPhase, CounterSpec};
pub use document::{PageDocument, VisibilityEntry};
pub use error::RevealError;
pub use gate::OneShot;
pub use geometry::{visibility_entry, Rect};
pub use ids::{ElementId, WatcherId};
pub use margin::{MarginLength, RootMargin};
pub use outputs::{Effect, Outputs, RevealEvent};
pub use strategy::RevealKind;
