//! `PageDocument` over a live `web_sys::Document`.

use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use sitefx_reveal::ids::IdAllocator;
use sitefx_reveal::{ElementId, PageDocument};

/// Hands out one `ElementId` per DOM node and remembers the node behind it.
pub struct DomDocument {
    document: Document,
    ids: IdAllocator,
    elements: Vec<Element>,
}

impl DomDocument {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ids: IdAllocator::new(),
            elements: Vec::new(),
        }
    }

    /// Id previously handed out for `element`, compared by node identity.
    ///
    /// Linear in the number of registered elements. DOM nodes cannot be
    /// hashed from Rust and tagging them with an attribute would write
    /// bookkeeping into the page, so pages with thousands of watched
    /// elements pay a scan per delivered entry.
    pub fn id_of(&self, element: &Element) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e == element)
            .map(|i| ElementId(i as u32))
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    fn intern(&mut self, element: Element) -> ElementId {
        if let Some(id) = self.id_of(&element) {
            return id;
        }
        let id = self.ids.alloc_element();
        self.elements.push(element);
        id
    }
}

impl PageDocument for DomDocument {
    fn query_selector_all(&mut self, selector: &str) -> Vec<ElementId> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                warn!(%selector, ?e, "querySelectorAll failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.intern(el))
            .collect()
    }

    fn text_content(&self, element: ElementId) -> Option<String> {
        self.element(element).and_then(|el| el.text_content())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element).and_then(|el| el.get_attribute(name))
    }
}
