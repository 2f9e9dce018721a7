//! Change detection between two measurements.

/// Check whether a size moved enough to be worth reporting.
///
/// True when `|old - new| >= tolerance`; a zero tolerance reports any
/// non-zero difference and nothing else.
pub fn is_size_changed(old_value: f64, new_value: f64, tolerance: f64) -> bool {
    let delta = (old_value - new_value).abs();
    delta > 0.0 && delta >= tolerance
}
