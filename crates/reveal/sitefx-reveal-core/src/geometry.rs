//! Minimal rectangle math for computing intersection ratios.
//!
//! Browsers compute this themselves; hosts without an intersection facility
//! (and the in-memory test page) use these helpers to produce the same
//! `VisibilityEntry` values.

use serde::{Deserialize, Serialize};

use crate::document::VisibilityEntry;
use crate::ids::ElementId;
use crate::margin::RootMargin;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            bottom: top + height,
            right: left + width,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    #[inline]
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Overlap of two rectangles. Edge-adjacent rectangles produce a
    /// zero-area overlap rather than `None`.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let r = Rect {
            top: self.top.max(other.top),
            left: self.left.max(other.left),
            bottom: self.bottom.min(other.bottom),
            right: self.right.min(other.right),
        };
        if r.bottom < r.top || r.right < r.left {
            None
        } else {
            Some(r)
        }
    }
}

/// Compute the visibility entry a browser would report for `target` against
/// `viewport` grown by `margin`.
pub fn visibility_entry(
    element: ElementId,
    target: Rect,
    viewport: Rect,
    margin: &RootMargin,
) -> VisibilityEntry {
    let root = margin.apply(viewport);
    match target.intersection(&root) {
        Some(overlap) => {
            let area = target.area();
            let ratio = if area > 0.0 {
                (overlap.area() / area).clamp(0.0, 1.0)
            } else {
                1.0
            };
            VisibilityEntry {
                element,
                is_intersecting: true,
                ratio,
            }
        }
        None => VisibilityEntry {
            element,
            is_intersecting: false,
            ratio: 0.0,
        },
    }
}
