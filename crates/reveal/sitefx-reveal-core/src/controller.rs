//! ViewportRevealController: owns watchers and per-element state, turns
//! visibility batches and animation frames into `Outputs`.
//!
//! Methods:
//! - new, initialize (selector discovery), register, handle_entries, frame

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, WatcherConfig};
use crate::counter::{CounterAnimation, CounterPhase};
use crate::document::{PageDocument, VisibilityEntry};
use crate::gate::OneShot;
use crate::ids::{ElementId, IdAllocator, WatcherId};
use crate::outputs::{Effect, Outputs, RevealEvent};
use crate::strategy::{self, RevealKind};

/// Kinds in the order `initialize` registers them. An element matched by
/// more than one selector belongs to the first kind that claims it.
pub const REGISTRATION_ORDER: [RevealKind; 4] = [
    RevealKind::LazyImage,
    RevealKind::Counter,
    RevealKind::TimelineStagger,
    RevealKind::FadeIn,
];

/// One visibility monitor: a kind, its trigger sensitivity and its targets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Watcher {
    pub id: WatcherId,
    pub kind: RevealKind,
    pub config: WatcherConfig,
    targets: Vec<ElementId>,
}

impl Watcher {
    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Controller-owned state record for one watched element.
#[derive(Debug)]
struct Target {
    watcher: WatcherId,
    kind: RevealKind,
    gate: OneShot,
    observing: bool,
    counter_phase: Option<CounterPhase>,
    counter: Option<CounterAnimation>,
}

impl Target {
    fn new(watcher: WatcherId, kind: RevealKind) -> Self {
        Self {
            watcher,
            kind,
            gate: OneShot::new(),
            observing: true,
            counter_phase: (kind == RevealKind::Counter).then_some(CounterPhase::Idle),
            counter: None,
        }
    }
}

#[derive(Debug)]
pub struct ViewportRevealController {
    cfg: Config,
    ids: IdAllocator,
    watchers: Vec<Watcher>,
    targets: HashMap<ElementId, Target>,
    /// Counters currently animating, in the order they started.
    animating: Vec<ElementId>,
    outputs: Outputs,
}

impl Default for ViewportRevealController {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ViewportRevealController {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            watchers: Vec::new(),
            targets: HashMap::new(),
            animating: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Discover targets for every kind by selector and register them.
    /// Returns the registration outputs (observe effects, timeline base classes).
    pub fn initialize(&mut self, doc: &mut dyn PageDocument) -> &Outputs {
        self.outputs.clear();
        for kind in REGISTRATION_ORDER {
            let (selector, watcher_cfg) = match kind {
                RevealKind::FadeIn => (&self.cfg.fade_in.selector, &self.cfg.fade_in.watcher),
                RevealKind::LazyImage => {
                    (&self.cfg.lazy_image.selector, &self.cfg.lazy_image.watcher)
                }
                RevealKind::TimelineStagger => {
                    (&self.cfg.timeline.selector, &self.cfg.timeline.watcher)
                }
                RevealKind::Counter => (&self.cfg.counter.selector, &self.cfg.counter.watcher),
            };
            let watcher_cfg = watcher_cfg.clone();
            let elements = doc.query_selector_all(selector);
            self.register_inner(kind, &elements, watcher_cfg);
        }
        &self.outputs
    }

    /// Register a set of elements under a new watcher of the given kind.
    /// Outputs for the registration are available from `outputs()`.
    pub fn register(
        &mut self,
        kind: RevealKind,
        elements: &[ElementId],
        config: WatcherConfig,
    ) -> WatcherId {
        self.outputs.clear();
        self.register_inner(kind, elements, config)
    }

    fn register_inner(
        &mut self,
        kind: RevealKind,
        elements: &[ElementId],
        config: WatcherConfig,
    ) -> WatcherId {
        let id = self.ids.alloc_watcher();
        let mut targets = Vec::with_capacity(elements.len());
        for &element in elements {
            if let Some(existing) = self.targets.get(&element) {
                debug!(?element, owner = ?existing.watcher, "element already watched");
                self.outputs.push_event(RevealEvent::AlreadyWatched {
                    element,
                    owner: existing.watcher,
                });
                continue;
            }
            self.targets.insert(element, Target::new(id, kind));
            targets.push(element);
            if kind == RevealKind::TimelineStagger {
                self.outputs.push_effect(Effect::AddClass {
                    element,
                    class: self.cfg.timeline.base_class.clone(),
                    delay_ms: 0,
                });
            }
            self.outputs.push_effect(Effect::Observe {
                watcher: id,
                element,
            });
        }
        debug!(watcher = ?id, ?kind, targets = targets.len(), "registered watcher");
        self.outputs.push_event(RevealEvent::Registered {
            watcher: id,
            kind,
            targets: targets.len(),
        });
        self.watchers.push(Watcher {
            id,
            kind,
            config,
            targets,
        });
        id
    }

    /// Handle one batch of visibility entries delivered for `watcher`.
    ///
    /// Entry positions within the batch drive timeline stagger delays, so
    /// hosts must pass entries exactly as one callback delivered them.
    pub fn handle_entries(
        &mut self,
        doc: &dyn PageDocument,
        watcher: WatcherId,
        entries: &[VisibilityEntry],
    ) -> &Outputs {
        self.outputs.clear();
        let Some(watcher_cfg) = self
            .watchers
            .iter()
            .find(|w| w.id == watcher)
            .map(|w| &w.config)
        else {
            debug!(?watcher, "entries for unknown watcher ignored");
            return &self.outputs;
        };

        for (index, entry) in entries.iter().enumerate() {
            if !watcher_cfg.qualifies(entry.is_intersecting, entry.ratio) {
                continue;
            }
            let Some(target) = self.targets.get_mut(&entry.element) else {
                continue;
            };
            if target.watcher != watcher || !target.observing || !target.gate.fire() {
                continue;
            }
            let element = entry.element;
            if target.kind.unobserves_on_reveal() {
                target.observing = false;
            }
            self.outputs.push_event(RevealEvent::Revealed {
                element,
                kind: target.kind,
            });
            match target.kind {
                RevealKind::FadeIn => {
                    strategy::reveal_fade_in(&self.cfg.fade_in, element, &mut self.outputs)
                }
                RevealKind::LazyImage => {
                    strategy::reveal_lazy_image(
                        &self.cfg.lazy_image,
                        doc,
                        watcher,
                        element,
                        &mut self.outputs,
                    );
                }
                RevealKind::TimelineStagger => strategy::reveal_timeline_item(
                    &self.cfg.timeline,
                    element,
                    index,
                    &mut self.outputs,
                ),
                RevealKind::Counter => {
                    match strategy::reveal_counter(&self.cfg.counter, doc, element, &mut self.outputs)
                    {
                        Some(anim) if anim.is_done() => {
                            target.counter_phase = Some(CounterPhase::Done);
                        }
                        Some(anim) => {
                            target.counter_phase = Some(CounterPhase::Animating);
                            target.counter = Some(anim);
                            self.animating.push(element);
                        }
                        None => target.counter_phase = Some(CounterPhase::Skipped),
                    }
                }
            }
        }

        if !self.animating.is_empty() {
            self.outputs.push_effect(Effect::RequestFrame);
        }
        &self.outputs
    }

    /// Advance every animating counter by one frame.
    pub fn frame(&mut self) -> &Outputs {
        self.outputs.clear();
        let cfg = &self.cfg.counter;
        let targets = &mut self.targets;
        let outputs = &mut self.outputs;
        self.animating.retain(|element| {
            let Some(target) = targets.get_mut(element) else {
                return false;
            };
            let Some(anim) = target.counter.as_mut() else {
                return false;
            };
            strategy::advance_counter(cfg, *element, anim, outputs);
            if anim.is_done() {
                target.counter_phase = Some(CounterPhase::Done);
                target.counter = None;
                false
            } else {
                true
            }
        });
        if !self.animating.is_empty() {
            self.outputs.push_effect(Effect::RequestFrame);
        }
        &self.outputs
    }

    /// Outputs of the most recent call.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn watchers(&self) -> &[Watcher] {
        &self.watchers
    }

    pub fn watcher(&self, id: WatcherId) -> Option<&Watcher> {
        self.watchers.iter().find(|w| w.id == id)
    }

    /// The watcher that owns `element`, if any.
    pub fn watcher_of(&self, element: ElementId) -> Option<WatcherId> {
        self.targets.get(&element).map(|t| t.watcher)
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.targets
            .get(&element)
            .is_some_and(|t| t.gate.has_fired())
    }

    /// False once a lazy image has been detached from its watcher.
    pub fn is_observing(&self, element: ElementId) -> bool {
        self.targets.get(&element).is_some_and(|t| t.observing)
    }

    pub fn counter_phase(&self, element: ElementId) -> Option<CounterPhase> {
        self.targets.get(&element).and_then(|t| t.counter_phase)
    }

    pub fn is_animating(&self) -> bool {
        !self.animating.is_empty()
    }

    pub fn revealed_count(&self) -> usize {
        self.targets.values().filter(|t| t.gate.has_fired()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoDoc;

    impl PageDocument for NoDoc {
        fn query_selector_all(&mut self, _selector: &str) -> Vec<ElementId> {
            Vec::new()
        }
        fn text_content(&self, _element: ElementId) -> Option<String> {
            None
        }
        fn attribute(&self, _element: ElementId, _name: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn fade_in_reveals_once_across_reentry() {
        let mut ctl = ViewportRevealController::default();
        let el = ElementId(7);
        let w = ctl.register(
            RevealKind::FadeIn,
            &[el],
            ctl.config().fade_in.watcher.clone(),
        );
        assert_eq!(
            ctl.outputs().effects,
            vec![Effect::Observe { watcher: w, element: el }]
        );

        let out = ctl.handle_entries(&NoDoc, w, &[VisibilityEntry::visible(el, 1.0)]);
        assert_eq!(
            out.effects,
            vec![Effect::AddClass {
                element: el,
                class: "visible".into(),
                delay_ms: 0
            }]
        );

        ctl.handle_entries(&NoDoc, w, &[VisibilityEntry::hidden(el)]);
        let out = ctl.handle_entries(&NoDoc, w, &[VisibilityEntry::visible(el, 1.0)]);
        assert!(out.is_empty());
        assert!(ctl.is_revealed(el));
        assert_eq!(ctl.revealed_count(), 1);
    }

    #[test]
    fn below_threshold_does_not_reveal() {
        let mut ctl = ViewportRevealController::default();
        let el = ElementId(1);
        let w = ctl.register(
            RevealKind::FadeIn,
            &[el],
            WatcherConfig::new(0.5, Default::default()).unwrap(),
        );
        let out = ctl.handle_entries(&NoDoc, w, &[VisibilityEntry::visible(el, 0.2)]);
        assert!(out.effects.is_empty());
        assert!(!ctl.is_revealed(el));
    }

    #[test]
    fn entries_for_other_watchers_are_ignored() {
        let mut ctl = ViewportRevealController::default();
        let a = ElementId(1);
        let b = ElementId(2);
        let wa = ctl.register(RevealKind::FadeIn, &[a], WatcherConfig::default());
        let _wb = ctl.register(RevealKind::FadeIn, &[b], WatcherConfig::default());

        let out = ctl.handle_entries(&NoDoc, wa, &[VisibilityEntry::visible(b, 1.0)]);
        assert!(out.is_empty());
        let out = ctl.handle_entries(&NoDoc, WatcherId(99), &[VisibilityEntry::visible(a, 1.0)]);
        assert!(out.is_empty());
        assert!(!ctl.is_revealed(b));
    }

    #[test]
    fn second_registration_of_same_element_is_skipped() {
        let mut ctl = ViewportRevealController::default();
        let el = ElementId(3);
        let first = ctl.register(RevealKind::Counter, &[el], WatcherConfig::default());
        let second = ctl.register(RevealKind::FadeIn, &[el, el], WatcherConfig::default());
        assert_eq!(ctl.watcher_of(el), Some(first));
        assert_eq!(ctl.watcher(first).unwrap().targets(), &[el]);
        assert!(ctl.watcher(second).unwrap().is_empty());
        assert!(ctl
            .outputs()
            .events
            .iter()
            .any(|e| matches!(e, RevealEvent::AlreadyWatched { owner, .. } if *owner == first)));
    }

    #[test]
    fn empty_document_registers_empty_watchers() {
        let mut ctl = ViewportRevealController::default();
        let out = ctl.initialize(&mut NoDoc);
        assert!(out.effects.is_empty());
        assert_eq!(ctl.watchers().len(), 4);
        assert!(ctl.watchers().iter().all(Watcher::is_empty));
        assert!(!ctl.is_animating());
    }
}
