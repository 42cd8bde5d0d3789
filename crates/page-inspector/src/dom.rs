//! Inspected-document snapshot model.
//!
//! The devtools bridge captures the page as a flat element arena: tag,
//! attributes, parent link, the computed-style fields the visibility rule
//! needs, and the viewport rect. Everything page-side operates on this
//! snapshot; nothing here touches a live DOM.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Index into the snapshot's element arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

/// The computed-style fields consulted by the visibility rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: "block".to_string(),
            visibility: "visible".to_string(),
            opacity: 1.0,
        }
    }
}

/// Viewport-relative bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One captured element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageElement {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub parent: Option<NodeId>,
    pub style: ComputedStyle,
    pub rect: BoundingRect,
}

impl PageElement {
    /// Detached element with default (visible) style and a zero rect.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            parent: None,
            style: ComputedStyle::default(),
            rect: BoundingRect::default(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_rect(mut self, rect: BoundingRect) -> Self {
        self.rect = rect;
        self
    }
}

/// Flat capture of the inspected document, in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    elements: Vec<PageElement>,
}

impl PageSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: PageElement) -> NodeId {
        let id = NodeId(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: NodeId) -> Option<&PageElement> {
        self.elements.get(id.0 as usize)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Document-order ids of elements with the given tag.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.tag == tag)
            .map(|(index, _)| NodeId(index as u32))
    }

    /// First element whose `id` attribute matches, in document order.
    pub fn element_by_dom_id(&self, dom_id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .find(|(_, e)| e.attributes.get("id").map(String::as_str) == Some(dom_id))
            .map(|(index, _)| NodeId(index as u32))
    }

    /// Walk parent links from the element outward (exclusive of itself).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.element(id).and_then(|e| e.parent);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.element(next).and_then(|e| e.parent);
            Some(next)
        })
    }

    /// Visibility rule: not display-none, not visibility-hidden, non-zero
    /// opacity, and a non-zero-area rendered box.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        element.style.display != "none"
            && element.style.visibility != "hidden"
            && element.style.opacity != 0.0
            && element.rect.width > 0.0
            && element.rect.height > 0.0
    }
}
