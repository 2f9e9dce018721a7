//! Read-only access to the rendered document.
//!
//! Every measurement goes through [`Page`], so strategies run the same way
//! against the browser DOM and against the in-memory page used by tests.

use crate::types::{Axis, Bounds, Extent};

/// The kind of a DOM node, as far as measurement cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Comments, processing instructions, ...
    Other,
}

/// A rendered document that can be measured.
pub trait Page {
    /// Handle to a node of the document.
    type Node: Clone;

    /// The `<body>` element.
    fn body(&self) -> Self::Node;

    /// The root `<html>` element.
    fn document_element(&self) -> Self::Node;

    fn kind(&self, node: &Self::Node) -> NodeKind;

    /// Upper-case tag name for elements, `None` otherwise.
    fn tag_name(&self, node: &Self::Node) -> Option<String>;

    /// Text content of a text node, `None` otherwise.
    fn text(&self, node: &Self::Node) -> Option<String>;

    /// All child nodes, text included.
    fn child_nodes(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Element children only.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Every element below `node`, in document order.
    fn descendants(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Bounding client rect of an element.
    fn element_rect(&self, node: &Self::Node) -> Bounds;

    /// Bounding rect of a range spanning a text node.
    fn text_rect(&self, node: &Self::Node) -> Bounds;

    /// Computed value of a CSS property (kebab-case name).
    fn computed_style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// Inline `style` value of a CSS property (kebab-case name).
    fn inline_style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// One of the box-model sizes of an element along an axis.
    fn extent(&self, node: &Self::Node, extent: Extent, axis: Axis) -> f64;

    /// `offsetLeft` of an element.
    fn offset_left(&self, node: &Self::Node) -> f64;

    /// Check whether a node is a `<script>` element.
    fn is_script(&self, node: &Self::Node) -> bool {
        self.tag_name(node)
            .map(|tag| tag.eq_ignore_ascii_case("script"))
            .unwrap_or(false)
    }
}
