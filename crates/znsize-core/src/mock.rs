//! In-memory page for exercising measurements without a browser.
//!
//! Nodes live in an arena; geometry and styles are whatever the test sets.

use std::collections::HashMap;

use crate::dom::{NodeKind, Page};
use crate::types::{Axis, Bounds, Extent};

/// Index of a node in a [`MockPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockNodeId(pub usize);

/// A node of the in-memory page.
#[derive(Debug, Clone)]
pub struct MockNode {
    pub kind: NodeKind,
    /// Upper-case tag name (elements only)
    pub tag: Option<String>,
    /// Character data (text nodes only)
    pub text: Option<String>,
    pub parent: Option<MockNodeId>,
    pub children: Vec<MockNodeId>,
    /// Bounding rect (elements) or range rect (text)
    pub rect: Bounds,
    pub computed: HashMap<String, String>,
    pub inline: HashMap<String, String>,
    pub offset_left: f64,
    pub extents: HashMap<(Extent, Axis), f64>,
}

impl MockNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            tag: None,
            text: None,
            parent: None,
            children: Vec::new(),
            rect: Bounds::default(),
            computed: HashMap::new(),
            inline: HashMap::new(),
            offset_left: 0.0,
            extents: HashMap::new(),
        }
    }
}

/// A document with an `<html>` root and a `<body>`.
#[derive(Debug, Clone)]
pub struct MockPage {
    nodes: Vec<MockNode>,
    root: MockNodeId,
    body: MockNodeId,
}

impl MockPage {
    /// Create an empty document.
    pub fn new() -> Self {
        let mut root = MockNode::new(NodeKind::Element);
        root.tag = Some("HTML".to_string());
        let mut page = Self {
            nodes: vec![root],
            root: MockNodeId(0),
            body: MockNodeId(0),
        };
        page.body = page.append_element(page.root, "body");
        page
    }

    pub fn root(&self) -> MockNodeId {
        self.root
    }

    pub fn body_id(&self) -> MockNodeId {
        self.body
    }

    pub fn node(&self, id: MockNodeId) -> &MockNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: MockNodeId) -> &mut MockNode {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, parent: MockNodeId, mut node: MockNode) -> MockNodeId {
        let id = MockNodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.node_mut(parent).children.push(id);
        id
    }

    /// Append an element as the last child of `parent`.
    pub fn append_element(&mut self, parent: MockNodeId, tag: &str) -> MockNodeId {
        let mut node = MockNode::new(NodeKind::Element);
        node.tag = Some(tag.to_ascii_uppercase());
        self.push(parent, node)
    }

    /// Append a text node as the last child of `parent`.
    pub fn append_text(&mut self, parent: MockNodeId, text: &str) -> MockNodeId {
        let mut node = MockNode::new(NodeKind::Text);
        node.text = Some(text.to_string());
        self.push(parent, node)
    }

    /// Append a comment node as the last child of `parent`.
    pub fn append_comment(&mut self, parent: MockNodeId) -> MockNodeId {
        self.push(parent, MockNode::new(NodeKind::Other))
    }

    /// Detach a node from its parent. The node stays in the arena.
    pub fn detach(&mut self, id: MockNodeId) -> &mut Self {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|&child| child != id);
        }
        self
    }

    pub fn set_rect(&mut self, id: MockNodeId, rect: Bounds) -> &mut Self {
        self.node_mut(id).rect = rect;
        self
    }

    pub fn set_computed(&mut self, id: MockNodeId, property: &str, value: &str) -> &mut Self {
        self.node_mut(id)
            .computed
            .insert(property.to_string(), value.to_string());
        self
    }

    pub fn set_inline(&mut self, id: MockNodeId, property: &str, value: &str) -> &mut Self {
        self.node_mut(id)
            .inline
            .insert(property.to_string(), value.to_string());
        self
    }

    pub fn set_extent(&mut self, id: MockNodeId, extent: Extent, axis: Axis, value: f64) -> &mut Self {
        self.node_mut(id).extents.insert((extent, axis), value);
        self
    }

    pub fn set_offset_left(&mut self, id: MockNodeId, value: f64) -> &mut Self {
        self.node_mut(id).offset_left = value;
        self
    }

    fn collect_elements(&self, id: MockNodeId, out: &mut Vec<MockNodeId>) {
        for &child in &self.node(id).children {
            if self.node(child).kind == NodeKind::Element {
                out.push(child);
                self.collect_elements(child, out);
            }
        }
    }
}

impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MockPage {
    type Node = MockNodeId;

    fn body(&self) -> MockNodeId {
        self.body
    }

    fn document_element(&self) -> MockNodeId {
        self.root
    }

    fn kind(&self, node: &MockNodeId) -> NodeKind {
        self.node(*node).kind
    }

    fn tag_name(&self, node: &MockNodeId) -> Option<String> {
        self.node(*node).tag.clone()
    }

    fn text(&self, node: &MockNodeId) -> Option<String> {
        self.node(*node).text.clone()
    }

    fn child_nodes(&self, node: &MockNodeId) -> Vec<MockNodeId> {
        self.node(*node).children.clone()
    }

    fn children(&self, node: &MockNodeId) -> Vec<MockNodeId> {
        self.node(*node)
            .children
            .iter()
            .copied()
            .filter(|&child| self.node(child).kind == NodeKind::Element)
            .collect()
    }

    fn descendants(&self, node: &MockNodeId) -> Vec<MockNodeId> {
        let mut out = Vec::new();
        self.collect_elements(*node, &mut out);
        out
    }

    fn element_rect(&self, node: &MockNodeId) -> Bounds {
        self.node(*node).rect
    }

    fn text_rect(&self, node: &MockNodeId) -> Bounds {
        self.node(*node).rect
    }

    fn computed_style(&self, node: &MockNodeId, property: &str) -> Option<String> {
        self.node(*node).computed.get(property).cloned()
    }

    fn inline_style(&self, node: &MockNodeId, property: &str) -> Option<String> {
        self.node(*node).inline.get(property).cloned()
    }

    fn extent(&self, node: &MockNodeId, extent: Extent, axis: Axis) -> f64 {
        self.node(*node)
            .extents
            .get(&(extent, axis))
            .copied()
            .unwrap_or(0.0)
    }

    fn offset_left(&self, node: &MockNodeId) -> f64 {
        self.node(*node).offset_left
    }
}
