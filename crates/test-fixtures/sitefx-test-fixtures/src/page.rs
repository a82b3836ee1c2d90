//! In-memory page: elements laid out in document coordinates, a scrollable
//! viewport, a millisecond clock for delayed class changes and an
//! intersection reporter that only delivers threshold-crossing changes, the
//! way a browser observer does.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use sitefx_reveal::{
    visibility_entry, Effect, ElementId, Outputs, PageDocument, Rect, ViewportRevealController,
    VisibilityEntry, WatcherId,
};

use crate::selector::matches_selector;

#[derive(Clone, Debug, PartialEq)]
pub struct FakeElement {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    /// Layout box in document coordinates.
    pub rect: Rect,
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            rect: Rect::default(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Place the element `top` pixels down the document, `height` tall.
    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.rect = Rect::new(0.0, top, 1000.0, height);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }
}

/// Serialized fixture layout.
#[derive(Clone, Debug, Deserialize)]
pub struct PageSpec {
    pub viewport: ViewportSpec,
    #[serde(default)]
    pub scroll_y: f64,
    pub elements: Vec<ElementSpec>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ViewportSpec {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug)]
struct PendingClass {
    due_ms: u64,
    element: ElementId,
    class: String,
}

/// Last threshold state reported per observed element.
type Reported = Option<(bool, bool)>;

#[derive(Debug)]
pub struct FakePage {
    elements: Vec<FakeElement>,
    viewport_width: f64,
    viewport_height: f64,
    scroll_y: f64,
    clock_ms: u64,
    pending: Vec<PendingClass>,
    observed: HashMap<WatcherId, Vec<(ElementId, Reported)>>,
    frame_requested: bool,
    /// Every text value written to an element, in order.
    text_history: HashMap<ElementId, Vec<String>>,
}

impl FakePage {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            elements: Vec::new(),
            viewport_width,
            viewport_height,
            scroll_y: 0.0,
            clock_ms: 0,
            pending: Vec::new(),
            observed: HashMap::new(),
            frame_requested: false,
            text_history: HashMap::new(),
        }
    }

    pub fn from_spec(spec: PageSpec) -> Self {
        let mut page = Self::new(spec.viewport.width, spec.viewport.height);
        page.scroll_y = spec.scroll_y;
        for e in spec.elements {
            let mut el = FakeElement::new(&e.tag);
            el.classes = e.classes;
            el.attributes = e.attributes;
            el.text = e.text;
            el.rect = Rect::new(0.0, e.top, spec.viewport.width, e.height);
            page.push(el);
        }
        page
    }

    pub fn push(&mut self, el: FakeElement) -> ElementId {
        self.elements.push(el);
        ElementId(self.elements.len() as u32 - 1)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: ElementId) -> &FakeElement {
        &self.elements[id.0 as usize]
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).has_class(class)
    }

    pub fn text(&self, id: ElementId) -> &str {
        &self.element(id).text
    }

    pub fn text_history(&self, id: ElementId) -> &[String] {
        self.text_history.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn select(&self, selector: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| matches_selector(el, selector))
            .map(|(i, _)| ElementId(i as u32))
            .collect()
    }

    pub fn is_observed(&self, watcher: WatcherId, element: ElementId) -> bool {
        self.observed
            .get(&watcher)
            .is_some_and(|list| list.iter().any(|(e, _)| *e == element))
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }

    fn viewport(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.viewport_width, self.viewport_height)
    }

    /// Apply controller effects in order.
    pub fn apply(&mut self, outputs: &Outputs) {
        for effect in &outputs.effects {
            match effect {
                Effect::Observe { watcher, element } => {
                    self.observed
                        .entry(*watcher)
                        .or_default()
                        .push((*element, None));
                }
                Effect::Unobserve { watcher, element } => {
                    if let Some(list) = self.observed.get_mut(watcher) {
                        list.retain(|(e, _)| e != element);
                    }
                }
                Effect::AddClass {
                    element,
                    class,
                    delay_ms,
                } => {
                    if *delay_ms == 0 {
                        self.elements[element.0 as usize].add_class(class);
                    } else {
                        self.pending.push(PendingClass {
                            due_ms: self.clock_ms + u64::from(*delay_ms),
                            element: *element,
                            class: class.clone(),
                        });
                    }
                }
                Effect::SetAttribute {
                    element,
                    name,
                    value,
                } => {
                    self.elements[element.0 as usize]
                        .attributes
                        .insert(name.clone(), value.clone());
                }
                Effect::RemoveAttribute { element, name } => {
                    self.elements[element.0 as usize].attributes.remove(name);
                }
                Effect::SetText { element, text } => {
                    self.elements[element.0 as usize].text = text.clone();
                    self.text_history
                        .entry(*element)
                        .or_default()
                        .push(text.clone());
                }
                Effect::RequestFrame => self.frame_requested = true,
            }
        }
    }

    /// Advance the clock, firing any delayed class additions that fall due.
    pub fn advance(&mut self, ms: u64) {
        self.clock_ms += ms;
        let now = self.clock_ms;
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = waiting;
        for p in due {
            self.elements[p.element.0 as usize].add_class(&p.class);
        }
    }

    /// Pending delayed class additions as `(element, due_ms)`.
    pub fn pending_classes(&self) -> Vec<(ElementId, u64)> {
        self.pending.iter().map(|p| (p.element, p.due_ms)).collect()
    }

    /// Entries an observer for `watcher` would deliver right now: every
    /// observed element seen for the first time, plus those whose
    /// intersecting/threshold state changed since the last delivery.
    pub fn take_entries(
        &mut self,
        watcher: WatcherId,
        threshold: f64,
        margin: &sitefx_reveal::RootMargin,
    ) -> Vec<VisibilityEntry> {
        let viewport = self.viewport();
        let Some(list) = self.observed.get_mut(&watcher) else {
            return Vec::new();
        };
        let mut batch = Vec::new();
        for (element, reported) in list.iter_mut() {
            let rect = self.elements[element.0 as usize].rect;
            let entry = visibility_entry(*element, rect, viewport, margin);
            let state = (entry.is_intersecting, entry.ratio >= threshold);
            if *reported != Some(state) {
                *reported = Some(state);
                batch.push(entry);
            }
        }
        batch
    }

    /// Deliver one batch per watcher and apply the resulting outputs.
    /// Returns the number of entries delivered.
    pub fn pump(&mut self, ctl: &mut ViewportRevealController) -> usize {
        let watchers: Vec<_> = ctl
            .watchers()
            .iter()
            .map(|w| (w.id, w.config.threshold, w.config.root_margin))
            .collect();
        let mut delivered = 0;
        for (id, threshold, margin) in watchers {
            let batch = self.take_entries(id, threshold, &margin);
            if batch.is_empty() {
                continue;
            }
            delivered += batch.len();
            let outputs = ctl.handle_entries(&*self, id, &batch).clone();
            self.apply(&outputs);
        }
        delivered
    }

    /// Run requested animation frames until none is requested or `max`
    /// frames have run, advancing the clock by `frame_ms` each time.
    /// Returns the number of frames run.
    pub fn run_frames(
        &mut self,
        ctl: &mut ViewportRevealController,
        frame_ms: u64,
        max: usize,
    ) -> usize {
        let mut frames = 0;
        while self.frame_requested && frames < max {
            self.frame_requested = false;
            self.advance(frame_ms);
            let outputs = ctl.frame().clone();
            self.apply(&outputs);
            frames += 1;
        }
        frames
    }
}

impl PageDocument for FakePage {
    fn query_selector_all(&mut self, selector: &str) -> Vec<ElementId> {
        self.select(selector)
    }

    fn text_content(&self, element: ElementId) -> Option<String> {
        self.elements.get(element.0 as usize).map(|e| e.text.clone())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.elements
            .get(element.0 as usize)
            .and_then(|e| e.attributes.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitefx_reveal::RootMargin;

    #[test]
    fn observer_reports_only_changes() {
        let mut page = FakePage::new(1000.0, 800.0);
        let below = page.push(FakeElement::new("div").at(1200.0, 200.0));
        let w = WatcherId(0);
        page.apply(&Outputs {
            effects: vec![Effect::Observe {
                watcher: w,
                element: below,
            }],
            events: vec![],
        });

        let margin = RootMargin::default();
        let first = page.take_entries(w, 0.0, &margin);
        assert_eq!(first, vec![VisibilityEntry::hidden(below)]);
        assert!(page.take_entries(w, 0.0, &margin).is_empty());

        page.scroll_to(600.0);
        let second = page.take_entries(w, 0.0, &margin);
        assert_eq!(second.len(), 1);
        assert!(second[0].is_intersecting);
    }

    #[test]
    fn delayed_classes_fire_when_due() {
        let mut page = FakePage::new(1000.0, 800.0);
        let el = page.push(FakeElement::new("li"));
        page.apply(&Outputs {
            effects: vec![Effect::AddClass {
                element: el,
                class: "visible".into(),
                delay_ms: 100,
            }],
            events: vec![],
        });
        page.advance(99);
        assert!(!page.has_class(el, "visible"));
        page.advance(1);
        assert!(page.has_class(el, "visible"));
    }
}
