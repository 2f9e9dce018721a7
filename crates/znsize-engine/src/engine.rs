//! The sizing engine proper.

use std::mem;

use tracing::{debug, trace, warn};
use znsize_core::{
    DimensionOverrides, Dimensions, HeightMethod, Page, SizeError, SizeOptions, WidthMethod,
};
use znsize_measure::{is_size_changed, measure_height, measure_width};

use crate::host::{Host, Trigger, UpdateRequester, WatchMode};
use crate::{EVENTS, MUTATION_DEBOUNCE_MS, UPDATE_TOLERANCE};

/// Auto-sizing state. A watch exists exactly while observing.
#[derive(Debug)]
pub enum AutoState<W, T> {
    Idle,
    Observing {
        watch: W,
        mode: WatchMode,
        /// Debounced remeasure waiting to fire
        pending: Option<T>,
    },
}

/// Measures a page and reports size changes to the host.
pub struct SizeEngine<P: Page, H: Host, R: UpdateRequester> {
    page: P,
    host: H,
    requester: R,
    options: SizeOptions,
    current_width: f64,
    current_height: f64,
    state: AutoState<H::Watch, H::Timer>,
}

impl<P: Page, H: Host, R: UpdateRequester> SizeEngine<P, H, R> {
    /// Create an idle engine. Nothing is measured until asked.
    pub fn new(page: P, host: H, requester: R, options: SizeOptions) -> Self {
        Self {
            page,
            host,
            requester,
            options,
            current_width: 0.0,
            current_height: 0.0,
            state: AutoState::Idle,
        }
    }

    pub fn options(&self) -> SizeOptions {
        self.options
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn state(&self) -> &AutoState<H::Watch, H::Timer> {
        &self.state
    }

    /// Last measured width.
    pub fn current_width(&self) -> f64 {
        self.current_width
    }

    /// Last measured height.
    pub fn current_height(&self) -> f64 {
        self.current_height
    }

    pub fn is_auto_enabled(&self) -> bool {
        matches!(self.state, AutoState::Observing { .. })
    }

    /// Measure the width with `method`, or the configured one.
    pub fn get_width(&self, method: Option<WidthMethod>) -> f64 {
        measure_width(&self.page, method.unwrap_or(self.options.width))
    }

    /// Measure the height with `method`, or the configured one.
    pub fn get_height(&self, method: Option<HeightMethod>) -> f64 {
        measure_height(&self.page, method.unwrap_or(self.options.height))
    }

    /// Measure the width with the strategy called `name`, or the configured one.
    pub fn get_width_named(&self, name: Option<&str>) -> Result<f64, SizeError> {
        let method = name.map(str::parse::<WidthMethod>).transpose()?;
        Ok(self.get_width(method))
    }

    /// Measure the height with the strategy called `name`, or the configured one.
    pub fn get_height_named(&self, name: Option<&str>) -> Result<f64, SizeError> {
        let method = name.map(str::parse::<HeightMethod>).transpose()?;
        Ok(self.get_height(method))
    }

    /// Re-measure both dimensions, returning the previous `(width, height)`.
    fn remeasure(&mut self) -> (f64, f64) {
        let previous = (self.current_width, self.current_height);
        self.current_height = self.get_height(None);
        self.current_width = self.get_width(None);
        previous
    }

    /// Re-measure and notify the host if either dimension moved by at least
    /// [`UPDATE_TOLERANCE`]. Returns whether the host was called.
    pub fn measure_and_update(&mut self) -> bool {
        let (width, height) = self.remeasure();
        let changed = is_size_changed(width, self.current_width, UPDATE_TOLERANCE)
            || is_size_changed(height, self.current_height, UPDATE_TOLERANCE);
        if !changed {
            trace!(
                width = self.current_width,
                height = self.current_height,
                "size within tolerance"
            );
            return false;
        }

        let dimensions = Dimensions::from_px(self.current_width, self.current_height);
        debug!(
            width = %dimensions.width,
            height = %dimensions.height,
            "size changed"
        );
        self.requester.request_update(dimensions);
        true
    }

    /// Re-measure and notify the host unconditionally, substituting any
    /// dimension the caller supplies.
    pub fn send_dimensions(&mut self, overrides: DimensionOverrides) -> Dimensions {
        self.remeasure();
        let dimensions =
            Dimensions::from_px(self.current_width, self.current_height).with_overrides(overrides);
        debug!(
            width = %dimensions.width,
            height = %dimensions.height,
            "sending dimensions"
        );
        self.requester.request_update(dimensions.clone());
        dimensions
    }

    /// Start auto-sizing. Returns `Ok(false)` when already observing.
    ///
    /// Measures once immediately, then attaches the watch. If attaching
    /// fails the engine stays idle.
    pub fn auto_size(&mut self, mode: WatchMode) -> Result<bool, SizeError> {
        if self.is_auto_enabled() {
            debug!("auto-size already active");
            return Ok(false);
        }

        self.measure_and_update();
        let watch = self.host.attach(mode, &EVENTS)?;
        self.state = AutoState::Observing {
            watch,
            mode,
            pending: None,
        };
        debug!(?mode, "auto-size started");
        Ok(true)
    }

    /// Stop auto-sizing. Returns `false` when already idle.
    ///
    /// A pending debounced remeasure is cancelled along with the watch.
    pub fn stop_auto_size(&mut self) -> bool {
        match mem::replace(&mut self.state, AutoState::Idle) {
            AutoState::Idle => false,
            AutoState::Observing { watch, pending, .. } => {
                if let Some(timer) = pending {
                    self.host.cancel(timer);
                }
                self.host.detach(watch);
                debug!("auto-size stopped");
                true
            }
        }
    }

    /// React to an observation source. Returns whether the host was called.
    ///
    /// Triggers arriving while idle, or deadlines with nothing pending, are
    /// dropped.
    pub fn handle(&mut self, trigger: Trigger) -> bool {
        let AutoState::Observing { watch, pending, .. } = &mut self.state else {
            trace!(?trigger, "ignoring trigger while idle");
            return false;
        };

        match trigger {
            Trigger::Mutation => {
                if pending.is_some() {
                    trace!("remeasure already scheduled");
                    return false;
                }
                match self.host.schedule(watch, MUTATION_DEBOUNCE_MS) {
                    Ok(timer) => {
                        *pending = Some(timer);
                        false
                    }
                    Err(err) => {
                        warn!(%err, "could not schedule remeasure, measuring now");
                        self.measure_and_update()
                    }
                }
            }
            Trigger::Deadline => {
                if pending.take().is_none() {
                    trace!("stale deadline");
                    return false;
                }
                self.measure_and_update()
            }
            Trigger::Event(name) => {
                trace!(event = %name, "window event");
                self.measure_and_update()
            }
            Trigger::Tick => self.measure_and_update(),
        }
    }
}

impl<P: Page, H: Host, R: UpdateRequester> Drop for SizeEngine<P, H, R> {
    fn drop(&mut self) {
        self.stop_auto_size();
    }
}
