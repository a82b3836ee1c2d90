//! The seam between the controller and whatever page it runs against.

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

/// Read-only view of the host page.
///
/// Hosts own element identity: `query_selector_all` must return the same
/// `ElementId` for the same node every time it is asked.
pub trait PageDocument {
    /// All elements matching a CSS selector, in document order.
    fn query_selector_all(&mut self, selector: &str) -> Vec<ElementId>;

    /// Current text content of an element, `None` if the element is gone.
    fn text_content(&self, element: ElementId) -> Option<String>;

    /// Current value of an attribute, `None` when absent.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;
}

/// One visibility report for one element, as delivered by an intersection
/// facility. Several of these arrive together as a batch.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibilityEntry {
    pub element: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element in [0, 1].
    pub ratio: f64,
}

impl VisibilityEntry {
    pub fn visible(element: ElementId, ratio: f64) -> Self {
        Self {
            element,
            is_intersecting: true,
            ratio,
        }
    }

    pub fn hidden(element: ElementId) -> Self {
        Self {
            element,
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}
