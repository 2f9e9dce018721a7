//! Auto-sizing lifecycle for ZnSize.
//!
//! [`SizeEngine`] owns the last reported size, measures the page through the
//! configured strategies and calls the host back only when a dimension moved
//! by at least [`UPDATE_TOLERANCE`] pixels. With auto-sizing on, every
//! observation source (mutations, animation and transition events, interval
//! ticks) is funneled into [`SizeEngine::handle`] as a [`Trigger`].
//!
//! The engine never touches the browser itself: watches and timers go
//! through the [`Host`] trait, the page through [`znsize_core::Page`].

mod engine;
mod host;

pub use engine::{AutoState, SizeEngine};
pub use host::{Host, Trigger, UpdateRequester, WatchMode};

/// Minimum movement, in pixels, that is reported to the host.
pub const UPDATE_TOLERANCE: f64 = 2.0;

/// Delay between a mutation notification and the remeasure it schedules.
pub const MUTATION_DEBOUNCE_MS: u32 = 16;

/// Window events that trigger an immediate remeasure while auto-sizing.
pub const EVENTS: [&str; 22] = [
    "animationstart",
    "webkitAnimationStart",
    "animationiteration",
    "webkitAnimationIteration",
    "animationend",
    "webkitAnimationEnd",
    "orientationchange",
    "transitionstart",
    "webkitTransitionStart",
    "MSTransitionStart",
    "oTransitionStart",
    "otransitionstart",
    "transitioniteration",
    "webkitTransitionIteration",
    "MSTransitionIteration",
    "oTransitionIteration",
    "otransitioniteration",
    "transitionend",
    "webkitTransitionEnd",
    "MSTransitionEnd",
    "oTransitionEnd",
    "otransitionend",
];
