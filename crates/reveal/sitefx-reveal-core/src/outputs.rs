//! Output contracts from the reveal controller.
//!
//! Outputs carry the ordered DOM mutations for one call (`effects`) and a
//! separate list of semantic events. Adapters apply effects to the host page
//! in order and may log or forward events.

use serde::{Deserialize, Serialize};

use crate::ids::{ElementId, WatcherId};
use crate::strategy::RevealKind;

/// One presentation change the host must perform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Start delivering visibility entries for `element` to `watcher`.
    Observe {
        watcher: WatcherId,
        element: ElementId,
    },
    /// Stop delivering visibility entries for `element`.
    Unobserve {
        watcher: WatcherId,
        element: ElementId,
    },
    /// Add a class, after `delay_ms` if non-zero.
    AddClass {
        element: ElementId,
        class: String,
        delay_ms: u32,
    },
    SetAttribute {
        element: ElementId,
        name: String,
        value: String,
    },
    RemoveAttribute {
        element: ElementId,
        name: String,
    },
    SetText {
        element: ElementId,
        text: String,
    },
    /// At least one counter is still animating: call `frame()` on the next
    /// animation frame.
    RequestFrame,
}

/// Discrete signals emitted while handling entries and frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RevealEvent {
    Registered {
        watcher: WatcherId,
        kind: RevealKind,
        targets: usize,
    },
    /// An element was already owned by another watcher and was not added.
    AlreadyWatched {
        element: ElementId,
        owner: WatcherId,
    },
    Revealed {
        element: ElementId,
        kind: RevealKind,
    },
    LazySourceMissing {
        element: ElementId,
    },
    CounterStarted {
        element: ElementId,
        target: u64,
    },
    CounterSkipped {
        element: ElementId,
        text: String,
    },
    CounterFinished {
        element: ElementId,
        text: String,
    },
}

/// Outputs returned by the controller's registration, entry and frame calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub events: Vec<RevealEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.effects.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    #[inline]
    pub fn push_event(&mut self, event: RevealEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.events.is_empty()
    }
}
