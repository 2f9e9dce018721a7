//! The live browser document as a measurable [`Page`].

use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, Element, HtmlElement, Node, NodeList, Text, Window};
use znsize_core::{Axis, Bounds, Extent, NodeKind, Page, SizeError};

/// Reads geometry from `window.document`.
pub(crate) struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub(crate) fn new(window: &Window) -> Result<Self, SizeError> {
        let document = window
            .document()
            .ok_or_else(|| SizeError::host("window has no document"))?;
        Ok(Self {
            window: window.clone(),
            document,
        })
    }
}

fn bounds_of(rect: &DomRect) -> Bounds {
    Bounds::new(rect.x(), rect.y(), rect.width(), rect.height())
}

fn node_list_to_vec(list: &NodeList) -> Vec<Node> {
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

impl Page for WebPage {
    type Node = Node;

    fn body(&self) -> Node {
        match self.document.body() {
            Some(body) => body.into(),
            None => self.document_element(),
        }
    }

    fn document_element(&self) -> Node {
        match self.document.document_element() {
            Some(root) => root.into(),
            None => self.document.clone().into(),
        }
    }

    fn kind(&self, node: &Node) -> NodeKind {
        match node.node_type() {
            Node::ELEMENT_NODE => NodeKind::Element,
            Node::TEXT_NODE => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn tag_name(&self, node: &Node) -> Option<String> {
        node.dyn_ref::<Element>().map(Element::tag_name)
    }

    fn text(&self, node: &Node) -> Option<String> {
        node.dyn_ref::<Text>().map(|text| text.data())
    }

    fn child_nodes(&self, node: &Node) -> Vec<Node> {
        node_list_to_vec(&node.child_nodes())
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        let Some(element) = node.dyn_ref::<Element>() else {
            return Vec::new();
        };
        let children = element.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .map(Node::from)
            .collect()
    }

    fn descendants(&self, node: &Node) -> Vec<Node> {
        node.dyn_ref::<Element>()
            .and_then(|element| element.query_selector_all("*").ok())
            .map(|list| node_list_to_vec(&list))
            .unwrap_or_default()
    }

    fn element_rect(&self, node: &Node) -> Bounds {
        node.dyn_ref::<Element>()
            .map(|element| bounds_of(&element.get_bounding_client_rect()))
            .unwrap_or_default()
    }

    fn text_rect(&self, node: &Node) -> Bounds {
        let Ok(range) = self.document.create_range() else {
            return Bounds::default();
        };
        if range.select_node_contents(node).is_err() {
            return Bounds::default();
        }
        bounds_of(&range.get_bounding_client_rect())
    }

    fn computed_style(&self, node: &Node, property: &str) -> Option<String> {
        let element = node.dyn_ref::<Element>()?;
        let style = self.window.get_computed_style(element).ok()??;
        style
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn inline_style(&self, node: &Node, property: &str) -> Option<String> {
        node.dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn extent(&self, node: &Node, extent: Extent, axis: Axis) -> f64 {
        let Some(element) = node.dyn_ref::<Element>() else {
            return 0.0;
        };
        let value = match (extent, axis) {
            (Extent::Scroll, Axis::Height) => element.scroll_height(),
            (Extent::Scroll, Axis::Width) => element.scroll_width(),
            (Extent::Client, Axis::Height) => element.client_height(),
            (Extent::Client, Axis::Width) => element.client_width(),
            (Extent::Offset, axis) => match node.dyn_ref::<HtmlElement>() {
                Some(html) if axis == Axis::Height => html.offset_height(),
                Some(html) => html.offset_width(),
                None => 0,
            },
        };
        value as f64
    }

    fn offset_left(&self, node: &Node) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|html| html.offset_left() as f64)
            .unwrap_or(0.0)
    }
}
