//! Content sizing through single-child wrappers.
//!
//! Iframe bodies are often a lone wrapper stretched to fill the frame. Its
//! box says nothing about the content, so these strategies descend into it
//! and measure what is inside instead.

use tracing::trace;
use znsize_core::{Axis, NodeKind, Page, Side};

use crate::primitives::{has_relative_size, largest_edge};

/// Nodes that can contribute to the content bounds: no scripts, no comments,
/// no whitespace-only text.
fn content_candidates<P: Page>(page: &P, nodes: Vec<P::Node>) -> Vec<P::Node> {
    nodes
        .into_iter()
        .filter(|node| match page.kind(node) {
            NodeKind::Element => !page.is_script(node),
            NodeKind::Text => page
                .text(node)
                .map(|text| !text.trim().is_empty())
                .unwrap_or(false),
            NodeKind::Other => false,
        })
        .collect()
}

/// The lone element among `candidates`, if that is all there is.
fn single_wrapper<P: Page>(page: &P, candidates: &[P::Node]) -> Option<P::Node> {
    match candidates {
        [only] if page.kind(only) == NodeKind::Element => Some(only.clone()),
        _ => None,
    }
}

/// Content height of `nodes`.
///
/// Descends while a single element remains and that element's height is
/// relative to its container.
pub fn recursive_height<P: Page>(page: &P, nodes: Vec<P::Node>) -> f64 {
    let candidates = content_candidates(page, nodes);
    if let Some(wrapper) = single_wrapper(page, &candidates) {
        let inner = page.child_nodes(&wrapper);
        if has_relative_size(page, Axis::Height)(&wrapper) && !inner.is_empty() {
            trace!("unwrapping relatively sized wrapper for height");
            return recursive_height(page, inner);
        }
    }
    largest_edge(page, Side::Bottom, &candidates)
}

/// Content width of `nodes`.
///
/// Descends whenever a single element remains, whatever its sizing.
pub fn recursive_width<P: Page>(page: &P, nodes: Vec<P::Node>) -> f64 {
    let candidates = content_candidates(page, nodes);
    if let Some(wrapper) = single_wrapper(page, &candidates) {
        let inner = page.child_nodes(&wrapper);
        if !inner.is_empty() {
            trace!("unwrapping single wrapper for width");
            return recursive_width(page, inner);
        }
    }
    largest_edge(page, Side::Right, &candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use znsize_core::mock::{MockNodeId, MockPage};
    use znsize_core::Bounds;

    /// body > div.wrapper > div.content (500 x 500)
    fn wrapped_page(wrapper_height: &str, wrapper_rect: Bounds) -> (MockPage, MockNodeId) {
        let mut page = MockPage::new();
        let body = page.body_id();
        let wrapper = page.append_element(body, "div");
        let content = page.append_element(wrapper, "div");
        page.set_inline(wrapper, "height", wrapper_height)
            .set_rect(wrapper, wrapper_rect)
            .set_rect(content, Bounds::new(0.0, 0.0, 500.0, 500.0));
        (page, wrapper)
    }

    #[test]
    fn test_height_unwraps_relative_wrapper() {
        let (page, _) = wrapped_page("100%", Bounds::new(0.0, 0.0, 1024.0, 800.0));
        let body = page.body_id();
        let height = recursive_height(&page, page.child_nodes(&body));
        assert!(height >= 500.0);
        assert_eq!(height, 500.0);
    }

    #[test]
    fn test_height_stops_at_fixed_wrapper() {
        let (page, _) = wrapped_page("300px", Bounds::new(0.0, 0.0, 300.0, 300.0));
        let body = page.body_id();
        assert_eq!(recursive_height(&page, page.child_nodes(&body)), 300.0);
    }

    #[test]
    fn test_width_unwraps_regardless_of_sizing() {
        // Same fixed wrapper that stops the height descent.
        let (mut page, wrapper) = wrapped_page("300px", Bounds::new(0.0, 0.0, 300.0, 300.0));
        page.set_inline(wrapper, "width", "300px");
        let body = page.body_id();
        assert_eq!(recursive_width(&page, page.child_nodes(&body)), 500.0);
        assert_eq!(recursive_height(&page, page.child_nodes(&body)), 300.0);
    }

    #[test]
    fn test_siblings_stop_descent() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let first = page.append_element(body, "div");
        let second = page.append_element(body, "div");
        let nested = page.append_element(second, "div");
        page.set_inline(first, "height", "100%")
            .set_rect(first, Bounds::new(0.0, 0.0, 200.0, 120.0))
            .set_rect(second, Bounds::new(0.0, 120.0, 300.0, 80.0))
            .set_rect(nested, Bounds::new(0.0, 120.0, 900.0, 900.0));

        assert_eq!(recursive_height(&page, page.child_nodes(&body)), 200.0);
        assert_eq!(recursive_width(&page, page.child_nodes(&body)), 300.0);
    }

    #[test]
    fn test_scripts_and_blank_text_are_ignored() {
        let mut page = MockPage::new();
        let body = page.body_id();
        page.append_text(body, "\n  ");
        let wrapper = page.append_element(body, "div");
        let script = page.append_element(body, "script");
        page.append_text(body, "\n");
        let content = page.append_element(wrapper, "div");
        page.set_inline(wrapper, "height", "100vh")
            .set_rect(wrapper, Bounds::new(0.0, 0.0, 1024.0, 768.0))
            .set_rect(script, Bounds::new(0.0, 0.0, 2000.0, 2000.0))
            .set_rect(content, Bounds::new(0.0, 0.0, 400.0, 240.0));

        assert_eq!(recursive_height(&page, page.child_nodes(&body)), 240.0);
        assert_eq!(recursive_width(&page, page.child_nodes(&body)), 400.0);
    }

    #[test]
    fn test_text_content_is_measured() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let wrapper = page.append_element(body, "div");
        let text = page.append_text(wrapper, "Hello");
        page.set_inline(wrapper, "height", "100%")
            .set_rect(wrapper, Bounds::new(0.0, 0.0, 1024.0, 768.0))
            .set_rect(text, Bounds::new(8.0, 8.0, 42.0, 18.0));

        assert_eq!(recursive_height(&page, page.child_nodes(&body)), 26.0);
        assert_eq!(recursive_width(&page, page.child_nodes(&body)), 50.0);
    }

    #[test]
    fn test_empty_wrapper_measures_itself() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let image = page.append_element(body, "img");
        page.set_rect(image, Bounds::new(0.0, 0.0, 320.0, 200.0));

        assert_eq!(recursive_width(&page, page.child_nodes(&body)), 320.0);
        assert_eq!(recursive_height(&page, page.child_nodes(&body)), 200.0);
    }

    #[test]
    fn test_empty_body() {
        let page = MockPage::new();
        let body = page.body_id();
        assert_eq!(recursive_height(&page, page.child_nodes(&body)), 0.0);
        assert_eq!(recursive_width(&page, page.child_nodes(&body)), 0.0);
    }
}
