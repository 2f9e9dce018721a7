//! The seam between the engine and its embedding environment.

use znsize_core::{Dimensions, SizeError};

/// How auto-sizing notices that the page may have changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchMode {
    /// Watch the body subtree for attribute, text and child-list mutations.
    #[default]
    Mutations,
    /// Re-measure on a repeating timer instead of watching mutations.
    Interval { period_ms: u32 },
}

/// Something that may have changed the page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The mutation watch reported a batch of changes.
    Mutation,
    /// One of the watched window events fired.
    Event(String),
    /// The interval timer fired.
    Tick,
    /// A debounced remeasure came due.
    Deadline,
}

/// Environment services auto-sizing needs.
///
/// A watch bundles everything attached for one observing period: the
/// mutation observer or interval, and the event listeners. Detaching it
/// must leave nothing behind that can deliver another [`Trigger`].
pub trait Host {
    type Watch;
    type Timer;

    /// Start observing and listen for `events`.
    fn attach(&mut self, mode: WatchMode, events: &[&'static str]) -> Result<Self::Watch, SizeError>;

    /// Tear down everything `attach` set up.
    fn detach(&mut self, watch: Self::Watch);

    /// Deliver [`Trigger::Deadline`] once after `delay_ms`.
    fn schedule(&mut self, watch: &Self::Watch, delay_ms: u32) -> Result<Self::Timer, SizeError>;

    /// Cancel a scheduled deadline that has not fired yet.
    fn cancel(&mut self, timer: Self::Timer);
}

/// Receives the dimensions record whenever the size changed.
pub trait UpdateRequester {
    fn request_update(&mut self, dimensions: Dimensions);
}

impl<F> UpdateRequester for F
where
    F: FnMut(Dimensions),
{
    fn request_update(&mut self, dimensions: Dimensions) {
        self(dimensions)
    }
}
