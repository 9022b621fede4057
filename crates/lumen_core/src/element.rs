//! Element tree
//!
//! A small DOM-like tree of mountable elements. Elements are stored in a
//! [`SlotMap`], so an [`ElementId`] that outlives its element (because the
//! element or one of its ancestors was unmounted) simply stops resolving.
//! Every accessor treats such a stale id as "not in the document" and
//! returns `false`/`None` instead of panicking.
//!
//! Bounds are expressed in document coordinates (not viewport coordinates),
//! which is what scroll-position predicates need.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to an element mounted in a [`Document`]
    pub struct ElementId;
}

/// Axis-aligned element bounds in document coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }

    /// Check whether a point lies inside these bounds
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.bottom()
    }
}

/// Visible area of the document
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

struct ElementNode {
    parent: Option<ElementId>,
    children: SmallVec<[ElementId; 4]>,
    bounds: Bounds,
    text: Option<String>,
    style: FxHashMap<String, String>,
}

impl ElementNode {
    fn new(parent: Option<ElementId>, bounds: Bounds) -> Self {
        Self {
            parent,
            children: SmallVec::new(),
            bounds,
            text: None,
            style: FxHashMap::default(),
        }
    }
}

/// The element tree plus the scroll state of the page that hosts it
pub struct Document {
    nodes: SlotMap<ElementId, ElementNode>,
    scroll_y: f32,
    viewport: Viewport,
}

impl Document {
    pub fn new() -> Self {
        Self::with_viewport(Viewport::default())
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            scroll_y: 0.0,
            viewport,
        }
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Mount a new top-level element
    pub fn mount(&mut self, bounds: Bounds) -> ElementId {
        self.nodes.insert(ElementNode::new(None, bounds))
    }

    /// Mount a new element under `parent`
    ///
    /// Returns `None` if the parent is not attached.
    pub fn mount_child(&mut self, parent: ElementId, bounds: Bounds) -> Option<ElementId> {
        if !self.nodes.contains_key(parent) {
            tracing::debug!("mount_child: parent {:?} is not attached", parent);
            return None;
        }
        let id = self.nodes.insert(ElementNode::new(Some(parent), bounds));
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        Some(id)
    }

    /// Unmount an element and its whole subtree
    ///
    /// Returns `false` if the element was not attached.
    pub fn unmount(&mut self, id: ElementId) -> bool {
        let Some(node) = self.nodes.remove(id) else {
            return false;
        };

        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }

        let mut pending: Vec<ElementId> = node.children.into_vec();
        while let Some(child) = pending.pop() {
            if let Some(child_node) = self.nodes.remove(child) {
                pending.extend(child_node.children);
            }
        }
        true
    }

    pub fn is_attached(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of attached elements
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    // =========================================================================
    // Geometry & content
    // =========================================================================

    pub fn bounds(&self, id: ElementId) -> Option<Bounds> {
        self.nodes.get(id).map(|n| n.bounds)
    }

    pub fn set_bounds(&mut self, id: ElementId, bounds: Bounds) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.bounds = bounds;
                true
            }
            None => false,
        }
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.text.as_deref())
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.text = Some(text.into());
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Inline style
    // =========================================================================

    /// Set an inline style property on an element
    pub fn set_style(&mut self, id: ElementId, property: &str, value: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.style.insert(property.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|n| n.style.get(property).map(String::as_str))
    }

    pub fn remove_style(&mut self, id: ElementId, property: &str) -> Option<String> {
        self.nodes
            .get_mut(id)
            .and_then(|n| n.style.remove(property))
    }

    // =========================================================================
    // Scroll state
    // =========================================================================

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Scroll to a vertical offset (negative offsets clamp to zero)
    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y.max(0.0);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_and_unmount() {
        let mut doc = Document::new();
        let id = doc.mount(Bounds::new(0.0, 100.0, 200.0, 50.0));

        assert!(doc.is_attached(id));
        assert_eq!(doc.bounds(id).map(|b| b.bottom()), Some(150.0));

        assert!(doc.unmount(id));
        assert!(!doc.is_attached(id));
        assert!(!doc.unmount(id));
    }

    #[test]
    fn test_unmount_detaches_subtree() {
        let mut doc = Document::new();
        let root = doc.mount(Bounds::default());
        let child = doc.mount_child(root, Bounds::default()).unwrap();
        let grandchild = doc.mount_child(child, Bounds::default()).unwrap();

        assert_eq!(doc.children(root), &[child]);
        assert_eq!(doc.parent(grandchild), Some(child));

        doc.unmount(child);
        assert!(doc.is_attached(root));
        assert!(!doc.is_attached(child));
        assert!(!doc.is_attached(grandchild));
        assert!(doc.children(root).is_empty());
    }

    #[test]
    fn test_stale_id_operations_are_noops() {
        let mut doc = Document::new();
        let id = doc.mount(Bounds::default());
        doc.unmount(id);

        assert!(!doc.set_style(id, "opacity", "0"));
        assert!(!doc.set_text(id, "hello"));
        assert!(doc.style(id, "opacity").is_none());
        assert!(doc.mount_child(id, Bounds::default()).is_none());
    }

    #[test]
    fn test_style_and_text() {
        let mut doc = Document::new();
        let id = doc.mount(Bounds::default());

        doc.set_text(id, "Settle in INR");
        doc.set_style(id, "will-change", "transform");

        assert_eq!(doc.text(id), Some("Settle in INR"));
        assert_eq!(doc.style(id, "will-change"), Some("transform"));
        assert_eq!(doc.remove_style(id, "will-change").as_deref(), Some("transform"));
    }

    #[test]
    fn test_scroll_clamps_negative() {
        let mut doc = Document::new();
        doc.set_scroll_y(-20.0);
        assert_eq!(doc.scroll_y(), 0.0);
    }
}
