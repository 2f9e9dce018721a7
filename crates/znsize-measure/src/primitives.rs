//! Low-level geometry readers.

use znsize_core::{parse_css_int, Axis, NodeKind, Page, Side};

/// Integer pixel value of a computed CSS property, `0` when absent or non-numeric.
///
/// Reads from the body when no element is given.
pub fn computed_style_value<P: Page>(page: &P, property: &str, element: Option<&P::Node>) -> f64 {
    let value = match element {
        Some(node) => page.computed_style(node, property),
        None => page.computed_style(&page.body(), property),
    };
    value.as_deref().and_then(parse_css_int).unwrap_or(0) as f64
}

fn is_auto(value: Option<String>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("auto"))
        .unwrap_or(false)
}

/// Margin an element adds beyond its border box on one side.
///
/// Auto margins collapse visually and contribute nothing.
fn margin_on<P: Page>(page: &P, node: &P::Node, side: Side) -> f64 {
    let property = side.margin_property();
    if is_auto(page.inline_style(node, property)) || is_auto(page.computed_style(node, property)) {
        return 0.0;
    }
    computed_style_value(page, property, Some(node))
}

/// Largest extent towards `side` among `nodes`, `0` for an empty set.
///
/// Elements count their bounding rect plus margin, text nodes the rect of a
/// range spanning them. Anything else is skipped.
pub fn largest_edge<P: Page>(page: &P, side: Side, nodes: &[P::Node]) -> f64 {
    nodes
        .iter()
        .filter_map(|node| match page.kind(node) {
            NodeKind::Element => Some(page.element_rect(node).edge(side) + margin_on(page, node, side)),
            NodeKind::Text => Some(page.text_rect(node).edge(side)),
            NodeKind::Other => None,
        })
        .fold(0.0, f64::max)
}

/// Smallest `offsetLeft` among the body's children, never above `0`.
pub fn smallest_left_offset<P: Page>(page: &P) -> f64 {
    top_level_elements(page)
        .iter()
        .map(|node| page.offset_left(node))
        .fold(0.0, f64::min)
}

/// Predicate: is the element's inline size on `axis` relative to its container?
pub fn has_relative_size<'a, P: Page>(page: &'a P, axis: Axis) -> impl Fn(&P::Node) -> bool + 'a {
    move |node: &P::Node| {
        page.inline_style(node, axis.style_property())
            .map(|value| znsize_core::is_relative_length(&value))
            .unwrap_or(false)
    }
}

/// Every element inside the body.
pub fn all_elements<P: Page>(page: &P) -> Vec<P::Node> {
    page.descendants(&page.body())
}

/// The body's element children.
pub fn top_level_elements<P: Page>(page: &P) -> Vec<P::Node> {
    page.children(&page.body())
}

#[cfg(test)]
mod tests {
    use super::*;
    use znsize_core::mock::MockPage;
    use znsize_core::Bounds;

    #[test]
    fn test_computed_style_value_defaults_to_body() {
        let mut page = MockPage::new();
        let body = page.body_id();
        page.set_computed(body, "margin-top", "8px");
        assert_eq!(computed_style_value(&page, "margin-top", None), 8.0);
        assert_eq!(computed_style_value(&page, "margin-left", None), 0.0);
    }

    #[test]
    fn test_computed_style_value_non_numeric() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let div = page.append_element(body, "div");
        page.set_computed(div, "margin-bottom", "auto");
        assert_eq!(computed_style_value(&page, "margin-bottom", Some(&div)), 0.0);
    }

    #[test]
    fn test_largest_edge_picks_maximum() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let narrow = page.append_element(body, "div");
        let wide = page.append_element(body, "div");
        page.set_rect(narrow, Bounds::new(0.0, 0.0, 100.0, 20.0));
        page.set_rect(wide, Bounds::new(0.0, 20.0, 250.0, 20.0));

        assert_eq!(largest_edge(&page, Side::Right, &[narrow, wide]), 250.0);
        assert_eq!(largest_edge(&page, Side::Bottom, &[narrow, wide]), 40.0);
    }

    #[test]
    fn test_largest_edge_adds_margin() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let div = page.append_element(body, "div");
        page.set_rect(div, Bounds::new(0.0, 0.0, 250.0, 20.0))
            .set_computed(div, "margin-right", "16px");

        assert_eq!(largest_edge(&page, Side::Right, &[div]), 266.0);
    }

    #[test]
    fn test_largest_edge_ignores_auto_margin() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let narrow = page.append_element(body, "div");
        let wide = page.append_element(body, "div");
        page.set_rect(narrow, Bounds::new(0.0, 0.0, 100.0, 20.0));
        // Browsers resolve auto margins to a used pixel value in computed style.
        page.set_rect(wide, Bounds::new(0.0, 0.0, 250.0, 20.0))
            .set_inline(wide, "margin-right", "auto")
            .set_computed(wide, "margin-right", "375px");

        assert_eq!(largest_edge(&page, Side::Right, &[narrow, wide]), 250.0);

        page.set_computed(wide, "margin-right", "auto");
        assert_eq!(largest_edge(&page, Side::Right, &[narrow, wide]), 250.0);
    }

    #[test]
    fn test_largest_edge_text_and_other_nodes() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let text = page.append_text(body, "some words");
        let comment = page.append_comment(body);
        page.set_rect(text, Bounds::new(0.0, 0.0, 80.0, 18.0));
        page.set_rect(comment, Bounds::new(0.0, 0.0, 900.0, 900.0));

        assert_eq!(largest_edge(&page, Side::Bottom, &[text, comment]), 18.0);
    }

    #[test]
    fn test_largest_edge_empty() {
        let page = MockPage::new();
        assert_eq!(largest_edge(&page, Side::Bottom, &[]), 0.0);
    }

    #[test]
    fn test_smallest_left_offset() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let a = page.append_element(body, "div");
        let b = page.append_element(body, "div");
        page.set_offset_left(a, 12.0).set_offset_left(b, 4.0);
        assert_eq!(smallest_left_offset(&page), 0.0);

        page.set_offset_left(b, -30.0);
        assert_eq!(smallest_left_offset(&page), -30.0);
    }

    #[test]
    fn test_has_relative_size() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let div = page.append_element(body, "div");
        page.set_inline(div, "height", "100%").set_inline(div, "width", "320px");

        assert!(has_relative_size(&page, Axis::Height)(&div));
        assert!(!has_relative_size(&page, Axis::Width)(&div));
        assert!(!has_relative_size(&page, Axis::Height)(&body));
    }

    #[test]
    fn test_all_vs_top_level_elements() {
        let mut page = MockPage::new();
        let body = page.body_id();
        let outer = page.append_element(body, "div");
        page.append_element(outer, "span");

        assert_eq!(top_level_elements(&page).len(), 1);
        assert_eq!(all_elements(&page).len(), 2);
    }
}
