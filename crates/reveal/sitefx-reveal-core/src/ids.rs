//! Identifiers and simple allocators for watched elements and watchers.

use serde::{Deserialize, Serialize};

/// Host-assigned identity of a presentation element.
///
/// The core never invents element ids; hosts hand them out (usually in
/// document order) and keep the mapping back to their real nodes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ElementId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct WatcherId(pub u32);

/// Monotonic allocator for ElementId and WatcherId.
/// Dense indices let hosts keep elements in a plain Vec.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_element: u32,
    next_watcher: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_element(&mut self) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element = self.next_element.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_watcher(&mut self) -> WatcherId {
        let id = WatcherId(self.next_watcher);
        self.next_watcher = self.next_watcher.wrapping_add(1);
        id
    }
}
