//! Height and width strategy tables.
//!
//! Each [`HeightMethod`] / [`WidthMethod`] maps to one zero-context
//! measurement of the page. The tables are closed: every identifier has an
//! entry, and name lookups fail with [`SizeError::UnknownMethod`].

use znsize_core::{Axis, Extent, HeightMethod, Page, SizeError, WidthMethod};

use crate::content::{recursive_height, recursive_width};
use crate::primitives::{
    all_elements, computed_style_value, largest_edge, smallest_left_offset, top_level_elements,
};

/// A table entry: measures the page under one definition of "size".
pub type Strategy<P> = fn(&P) -> f64;

fn body_extent<P: Page>(page: &P, extent: Extent, axis: Axis) -> f64 {
    page.extent(&page.body(), extent, axis)
}

fn root_extent<P: Page>(page: &P, extent: Extent, axis: Axis) -> f64 {
    page.extent(&page.document_element(), extent, axis)
}

// Height strategies

fn height_body_offset<P: Page>(page: &P) -> f64 {
    body_extent(page, Extent::Offset, Axis::Height)
        + computed_style_value(page, "margin-top", None)
        + computed_style_value(page, "margin-bottom", None)
}

fn height_body_scroll<P: Page>(page: &P) -> f64 {
    body_extent(page, Extent::Scroll, Axis::Height)
}

fn height_document_element_offset<P: Page>(page: &P) -> f64 {
    root_extent(page, Extent::Offset, Axis::Height)
}

fn height_document_element_scroll<P: Page>(page: &P) -> f64 {
    root_extent(page, Extent::Scroll, Axis::Height)
}

fn height_furthest_element<P: Page>(page: &P) -> f64 {
    largest_edge(page, Axis::Height.far_side(), &all_elements(page))
}

fn height_content<P: Page>(page: &P) -> f64 {
    let scroll = body_extent(page, Extent::Scroll, Axis::Height);
    if scroll > body_extent(page, Extent::Client, Axis::Height) {
        return scroll;
    }
    recursive_height(page, page.child_nodes(&page.body()))
}

fn base_heights<P: Page>(page: &P) -> [f64; 4] {
    [
        height_body_offset(page),
        height_body_scroll(page),
        height_document_element_offset(page),
        height_document_element_scroll(page),
    ]
}

fn height_min<P: Page>(page: &P) -> f64 {
    base_heights(page).into_iter().fold(f64::INFINITY, f64::min)
}

fn height_max<P: Page>(page: &P) -> f64 {
    base_heights(page).into_iter().fold(f64::NEG_INFINITY, f64::max)
}

// Width strategies

fn width_body_offset<P: Page>(page: &P) -> f64 {
    body_extent(page, Extent::Offset, Axis::Width)
}

fn width_body_scroll<P: Page>(page: &P) -> f64 {
    body_extent(page, Extent::Scroll, Axis::Width)
}

fn width_document_element_offset<P: Page>(page: &P) -> f64 {
    root_extent(page, Extent::Offset, Axis::Width)
}

fn width_document_element_scroll<P: Page>(page: &P) -> f64 {
    root_extent(page, Extent::Scroll, Axis::Width)
}

/// Only the body's top-level elements; nested overflow is left to `content`.
fn width_furthest_element<P: Page>(page: &P) -> f64 {
    largest_edge(page, Axis::Width.far_side(), &top_level_elements(page))
}

fn width_content<P: Page>(page: &P) -> f64 {
    let offset = smallest_left_offset(page);
    let scroll = body_extent(page, Extent::Scroll, Axis::Width);
    if scroll > body_extent(page, Extent::Client, Axis::Width) {
        return offset + scroll;
    }
    offset + recursive_width(page, page.child_nodes(&page.body()))
}

fn base_widths<P: Page>(page: &P) -> [f64; 4] {
    [
        width_body_offset(page),
        width_body_scroll(page),
        width_document_element_offset(page),
        width_document_element_scroll(page),
    ]
}

fn width_min<P: Page>(page: &P) -> f64 {
    base_widths(page).into_iter().fold(f64::INFINITY, f64::min)
}

fn width_max<P: Page>(page: &P) -> f64 {
    base_widths(page).into_iter().fold(f64::NEG_INFINITY, f64::max)
}

fn width_scroll<P: Page>(page: &P) -> f64 {
    width_body_scroll(page).max(width_document_element_scroll(page))
}

/// Look up the height table entry for `method`.
pub fn height_strategy<P: Page>(method: HeightMethod) -> Strategy<P> {
    match method {
        HeightMethod::BodyOffset => height_body_offset::<P>,
        HeightMethod::BodyScroll => height_body_scroll::<P>,
        HeightMethod::DocumentElementOffset => height_document_element_offset::<P>,
        HeightMethod::DocumentElementScroll => height_document_element_scroll::<P>,
        HeightMethod::FurthestElement => height_furthest_element::<P>,
        HeightMethod::Content => height_content::<P>,
        HeightMethod::Min => height_min::<P>,
        HeightMethod::Max => height_max::<P>,
    }
}

/// Look up the width table entry for `method`.
pub fn width_strategy<P: Page>(method: WidthMethod) -> Strategy<P> {
    match method {
        WidthMethod::BodyOffset => width_body_offset::<P>,
        WidthMethod::BodyScroll => width_body_scroll::<P>,
        WidthMethod::DocumentElementOffset => width_document_element_offset::<P>,
        WidthMethod::DocumentElementScroll => width_document_element_scroll::<P>,
        WidthMethod::FurthestElement => width_furthest_element::<P>,
        WidthMethod::Content => width_content::<P>,
        WidthMethod::Min => width_min::<P>,
        WidthMethod::Max => width_max::<P>,
        WidthMethod::Scroll => width_scroll::<P>,
    }
}

/// Measure the page height with `method`.
pub fn measure_height<P: Page>(page: &P, method: HeightMethod) -> f64 {
    height_strategy::<P>(method)(page)
}

/// Measure the page width with `method`.
pub fn measure_width<P: Page>(page: &P, method: WidthMethod) -> f64 {
    width_strategy::<P>(method)(page)
}

/// Measure the page height with the strategy called `name`.
pub fn measure_height_named<P: Page>(page: &P, name: &str) -> Result<f64, SizeError> {
    Ok(measure_height(page, name.parse()?))
}

/// Measure the page width with the strategy called `name`.
pub fn measure_width_named<P: Page>(page: &P, name: &str) -> Result<f64, SizeError> {
    Ok(measure_width(page, name.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use znsize_core::mock::MockPage;
    use znsize_core::Bounds;

    fn sized_page() -> MockPage {
        let mut page = MockPage::new();
        let body = page.body_id();
        let root = page.root();
        page.set_extent(body, Extent::Offset, Axis::Height, 400.0)
            .set_extent(body, Extent::Scroll, Axis::Height, 420.0)
            .set_extent(body, Extent::Client, Axis::Height, 420.0)
            .set_extent(root, Extent::Offset, Axis::Height, 436.0)
            .set_extent(root, Extent::Scroll, Axis::Height, 600.0)
            .set_extent(body, Extent::Offset, Axis::Width, 600.0)
            .set_extent(body, Extent::Scroll, Axis::Width, 600.0)
            .set_extent(body, Extent::Client, Axis::Width, 600.0)
            .set_extent(root, Extent::Offset, Axis::Width, 616.0)
            .set_extent(root, Extent::Scroll, Axis::Width, 640.0)
            .set_computed(body, "margin-top", "8px")
            .set_computed(body, "margin-bottom", "8px");
        page
    }

    #[test]
    fn test_base_height_strategies() {
        let page = sized_page();
        assert_eq!(measure_height(&page, HeightMethod::BodyOffset), 416.0);
        assert_eq!(measure_height(&page, HeightMethod::BodyScroll), 420.0);
        assert_eq!(measure_height(&page, HeightMethod::DocumentElementOffset), 436.0);
        assert_eq!(measure_height(&page, HeightMethod::DocumentElementScroll), 600.0);
        assert_eq!(measure_height(&page, HeightMethod::Min), 416.0);
        assert_eq!(measure_height(&page, HeightMethod::Max), 600.0);
    }

    #[test]
    fn test_base_width_strategies() {
        let page = sized_page();
        assert_eq!(measure_width(&page, WidthMethod::BodyOffset), 600.0);
        assert_eq!(measure_width(&page, WidthMethod::DocumentElementOffset), 616.0);
        assert_eq!(measure_width(&page, WidthMethod::DocumentElementScroll), 640.0);
        assert_eq!(measure_width(&page, WidthMethod::Min), 600.0);
        assert_eq!(measure_width(&page, WidthMethod::Max), 640.0);
        assert_eq!(measure_width(&page, WidthMethod::Scroll), 640.0);
    }

    #[test]
    fn test_furthest_element_scope_differs_by_axis() {
        let mut page = sized_page();
        let body = page.body_id();
        let outer = page.append_element(body, "div");
        let nested = page.append_element(outer, "div");
        page.set_rect(outer, Bounds::new(0.0, 0.0, 300.0, 200.0))
            .set_rect(nested, Bounds::new(0.0, 150.0, 700.0, 350.0));

        // Height scans every element, width only the top level.
        assert_eq!(measure_height(&page, HeightMethod::FurthestElement), 500.0);
        assert_eq!(measure_width(&page, WidthMethod::FurthestElement), 300.0);
    }

    #[test]
    fn test_content_height_prefers_overflowing_scroll() {
        let mut page = sized_page();
        let body = page.body_id();
        page.set_extent(body, Extent::Scroll, Axis::Height, 900.0);
        assert_eq!(measure_height(&page, HeightMethod::Content), 900.0);
    }

    #[test]
    fn test_content_height_measures_children() {
        let mut page = sized_page();
        let body = page.body_id();
        let div = page.append_element(body, "div");
        page.set_rect(div, Bounds::new(0.0, 8.0, 300.0, 180.0));
        assert_eq!(measure_height(&page, HeightMethod::Content), 188.0);
    }

    #[test]
    fn test_content_width_with_overflow() {
        let mut page = sized_page();
        let body = page.body_id();
        let shifted = page.append_element(body, "div");
        let other = page.append_element(body, "div");
        page.set_offset_left(shifted, -24.0)
            .set_offset_left(other, 0.0)
            .set_extent(body, Extent::Scroll, Axis::Width, 800.0);

        assert_eq!(measure_width(&page, WidthMethod::Content), smallest_left_offset(&page) + 800.0);
        assert_eq!(measure_width(&page, WidthMethod::Content), 776.0);
    }

    #[test]
    fn test_content_width_measures_children() {
        let mut page = sized_page();
        let body = page.body_id();
        let div = page.append_element(body, "div");
        let inner = page.append_element(div, "div");
        page.set_rect(div, Bounds::new(0.0, 0.0, 600.0, 100.0))
            .set_rect(inner, Bounds::new(0.0, 0.0, 420.0, 100.0));
        assert_eq!(measure_width(&page, WidthMethod::Content), 420.0);
    }

    #[test]
    fn test_named_lookup() {
        let page = sized_page();
        assert_eq!(measure_height_named(&page, "bodyScroll"), Ok(420.0));
        assert_eq!(measure_width_named(&page, "scroll"), Ok(640.0));

        let err = measure_height_named(&page, "scroll").unwrap_err();
        assert!(matches!(err, SizeError::UnknownMethod { axis: Axis::Height, .. }));
        assert!(measure_width_named(&page, "eastToWest").is_err());
    }

    #[test]
    fn test_every_method_has_an_entry() {
        let page = sized_page();
        for method in HeightMethod::ALL {
            assert!(measure_height(&page, method).is_finite(), "{method}");
        }
        for method in WidthMethod::ALL {
            assert!(measure_width(&page, method).is_finite(), "{method}");
        }
    }
}
