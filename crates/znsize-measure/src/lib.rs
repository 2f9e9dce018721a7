//! Page measurement for ZnSize.
//!
//! This crate turns DOM geometry into a single height or width figure.
//!
//! # Architecture
//!
//! 1. **Primitives**: computed style lookup, largest edge scans, left offset compensation
//! 2. **Content sizing**: unwraps single-child wrappers to reach the real content bounds
//! 3. **Strategy tables**: one named algorithm per [`HeightMethod`] / [`WidthMethod`]
//! 4. **Change detection**: tolerance comparison between two measurements
//!
//! # Example
//!
//! ```ignore
//! use znsize_measure::{measure_height, measure_width};
//!
//! let height = measure_height(&page, HeightMethod::Content);
//! let width = measure_width(&page, WidthMethod::Scroll);
//! ```

mod change;
mod content;
mod primitives;
mod strategy;

pub use change::is_size_changed;
pub use content::{recursive_height, recursive_width};
pub use primitives::{
    all_elements, computed_style_value, has_relative_size, largest_edge, smallest_left_offset,
    top_level_elements,
};
pub use strategy::{
    height_strategy, measure_height, measure_height_named, measure_width, measure_width_named,
    width_strategy, Strategy,
};

pub use znsize_core::{HeightMethod, WidthMethod};
