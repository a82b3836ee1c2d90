//! Browser runtime for the reveal controller: one IntersectionObserver per
//! watcher, timers for staggered classes and an animation-frame loop for
//! counters.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use sitefx_reveal::{
    Config, Effect, ElementId, Outputs, ViewportRevealController, VisibilityEntry, WatcherConfig,
    WatcherId,
};

use crate::dom::DomDocument;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct RevealRuntime {
    controller: RefCell<ViewportRevealController>,
    doc: RefCell<DomDocument>,
    observers: RefCell<Vec<(WatcherId, IntersectionObserver)>>,
    callbacks: RefCell<Vec<ObserverCallback>>,
    frame: RefCell<Option<AnimationFrame>>,
}

fn add_class(element: &Element, class: &str) {
    if let Err(e) = element.class_list().add_1(class) {
        warn!(%class, ?e, "classList.add failed");
    }
}

impl RevealRuntime {
    /// Discover targets, create the observers and start observing.
    pub fn start(document: Document, cfg: Config) -> Result<Rc<Self>, JsValue> {
        let runtime = Rc::new(Self {
            controller: RefCell::new(ViewportRevealController::new(cfg)),
            doc: RefCell::new(DomDocument::new(document)),
            observers: RefCell::new(Vec::new()),
            callbacks: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
        });

        let registration = {
            let mut ctl = runtime.controller.borrow_mut();
            let mut doc = runtime.doc.borrow_mut();
            ctl.initialize(&mut *doc).clone()
        };

        let watchers: Vec<(WatcherId, WatcherConfig)> = runtime
            .controller
            .borrow()
            .watchers()
            .iter()
            .filter(|w| !w.is_empty())
            .map(|w| (w.id, w.config.clone()))
            .collect();
        for (id, watcher_cfg) in watchers {
            runtime.create_observer(id, &watcher_cfg)?;
        }

        runtime.apply(&registration);
        Ok(runtime)
    }

    fn create_observer(self: &Rc<Self>, watcher: WatcherId, cfg: &WatcherConfig) -> Result<(), JsValue> {
        let weak: Weak<Self> = Rc::downgrade(self);
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |batch: Array, _observer: IntersectionObserver| {
                if let Some(runtime) = weak.upgrade() {
                    runtime.on_entries(watcher, &batch);
                }
            },
        ));

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(cfg.threshold));
        if !cfg.root_margin.is_zero() {
            init.set_root_margin(&cfg.root_margin.to_string());
        }
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        self.observers.borrow_mut().push((watcher, observer));
        self.callbacks.borrow_mut().push(callback);
        Ok(())
    }

    fn on_entries(self: &Rc<Self>, watcher: WatcherId, batch: &Array) {
        let outputs = {
            let doc = self.doc.borrow();
            let entries: Vec<VisibilityEntry> = batch
                .iter()
                .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let element = doc.id_of(&entry.target())?;
                    Some(VisibilityEntry {
                        element,
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    })
                })
                .collect();
            let mut ctl = self.controller.borrow_mut();
            ctl.handle_entries(&*doc, watcher, &entries).clone()
        };
        self.apply(&outputs);
    }

    fn schedule_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let runtime = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            runtime.frame.borrow_mut().take();
            let outputs = runtime.controller.borrow_mut().frame().clone();
            runtime.apply(&outputs);
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn element(&self, id: ElementId) -> Option<Element> {
        self.doc.borrow().element(id).cloned()
    }

    fn observer(&self, id: WatcherId) -> Option<IntersectionObserver> {
        self.observers
            .borrow()
            .iter()
            .find(|(w, _)| *w == id)
            .map(|(_, o)| o.clone())
    }

    fn apply(self: &Rc<Self>, outputs: &Outputs) {
        for event in &outputs.events {
            debug!(?event, "reveal event");
        }
        for effect in &outputs.effects {
            match effect {
                Effect::Observe { watcher, element } => {
                    if let (Some(obs), Some(el)) = (self.observer(*watcher), self.element(*element)) {
                        obs.observe(&el);
                    }
                }
                Effect::Unobserve { watcher, element } => {
                    if let (Some(obs), Some(el)) = (self.observer(*watcher), self.element(*element)) {
                        obs.unobserve(&el);
                    }
                }
                Effect::AddClass {
                    element,
                    class,
                    delay_ms,
                } => {
                    let Some(el) = self.element(*element) else {
                        continue;
                    };
                    if *delay_ms == 0 {
                        add_class(&el, class);
                    } else {
                        let class = class.clone();
                        Timeout::new(*delay_ms, move || add_class(&el, &class)).forget();
                    }
                }
                Effect::SetAttribute {
                    element,
                    name,
                    value,
                } => {
                    if let Some(el) = self.element(*element) {
                        if let Err(e) = el.set_attribute(name, value) {
                            warn!(%name, ?e, "setAttribute failed");
                        }
                    }
                }
                Effect::RemoveAttribute { element, name } => {
                    if let Some(el) = self.element(*element) {
                        if let Err(e) = el.remove_attribute(name) {
                            warn!(%name, ?e, "removeAttribute failed");
                        }
                    }
                }
                Effect::SetText { element, text } => {
                    if let Some(el) = self.element(*element) {
                        el.set_text_content(Some(text));
                    }
                }
                Effect::RequestFrame => self.schedule_frame(),
            }
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.controller.borrow().revealed_count()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.borrow().is_animating()
    }

    /// Stop every observer and any pending frame.
    pub fn disconnect(&self) {
        for (_, observer) in self.observers.borrow_mut().drain(..) {
            observer.disconnect();
        }
        self.callbacks.borrow_mut().clear();
        self.frame.borrow_mut().take();
    }
}
