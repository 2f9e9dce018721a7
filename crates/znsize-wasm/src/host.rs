//! Browser host: mutation observer, window listeners and timers.

use std::cell::RefCell;
use std::rc::Weak;

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, MutationObserver, MutationObserverInit, Window};
use znsize_core::SizeError;
use znsize_engine::{Host, Trigger, WatchMode};

use crate::{dispatch, Outbox, WebEngine};

fn host_error(what: &str, err: JsValue) -> SizeError {
    SizeError::host(format!("{}: {:?}", what, err))
}

/// What drives remeasurement besides window events.
enum Source {
    Mutations {
        observer: MutationObserver,
        _callback: Closure<dyn FnMut()>,
    },
    Interval {
        handle: i32,
        _callback: Closure<dyn FnMut()>,
    },
}

/// Everything attached for one auto-sizing period.
pub(crate) struct WebWatch {
    source: Option<Source>,
    on_event: Closure<dyn FnMut(Event)>,
    on_deadline: Closure<dyn FnMut()>,
    /// Events the listener is currently registered for
    events: Vec<&'static str>,
}

impl WebWatch {
    fn disconnect(&mut self, window: &Window) {
        for name in self.events.drain(..) {
            if let Err(err) =
                window.remove_event_listener_with_callback(name, self.on_event.as_ref().unchecked_ref())
            {
                warn!(event = name, ?err, "could not remove listener");
            }
        }
        match &self.source {
            Some(Source::Mutations { observer, .. }) => observer.disconnect(),
            Some(Source::Interval { handle, .. }) => window.clear_interval_with_handle(*handle),
            None => {}
        }
    }
}

/// Routes browser callbacks back into the engine that owns this host.
pub(crate) struct WebHost {
    window: Window,
    engine: Weak<RefCell<WebEngine>>,
    outbox: Outbox,
}

impl WebHost {
    pub(crate) fn new(window: Window, engine: Weak<RefCell<WebEngine>>, outbox: Outbox) -> Self {
        Self {
            window,
            engine,
            outbox,
        }
    }

    /// A callback that feeds `trigger` into the engine.
    fn trigger_callback(&self, trigger: Trigger) -> Closure<dyn FnMut()> {
        let engine = self.engine.clone();
        let outbox = self.outbox.clone();
        Closure::new(move || dispatch(&engine, &outbox, trigger.clone()))
    }

    fn observe_mutations(&self) -> Result<Source, SizeError> {
        let available = js_sys::Reflect::has(self.window.as_ref(), &JsValue::from_str("MutationObserver"))
            .unwrap_or(false);
        if !available {
            return Err(SizeError::MutationObserverUnavailable);
        }

        let body = self
            .window
            .document()
            .and_then(|document| document.body())
            .ok_or_else(|| SizeError::host("document has no body"))?;

        let callback = self.trigger_callback(Trigger::Mutation);
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|err| host_error("MutationObserver", err))?;

        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_old_value(false);
        init.set_character_data(true);
        init.set_character_data_old_value(false);
        init.set_child_list(true);
        init.set_subtree(true);
        observer
            .observe_with_options(&body, &init)
            .map_err(|err| host_error("MutationObserver.observe", err))?;

        Ok(Source::Mutations {
            observer,
            _callback: callback,
        })
    }

    fn start_interval(&self, period_ms: u32) -> Result<Source, SizeError> {
        let callback = self.trigger_callback(Trigger::Tick);
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms as i32,
            )
            .map_err(|err| host_error("setInterval", err))?;
        Ok(Source::Interval {
            handle,
            _callback: callback,
        })
    }
}

impl Host for WebHost {
    type Watch = WebWatch;
    type Timer = i32;

    fn attach(&mut self, mode: WatchMode, events: &[&'static str]) -> Result<WebWatch, SizeError> {
        let source = match mode {
            WatchMode::Mutations => self.observe_mutations()?,
            WatchMode::Interval { period_ms } => self.start_interval(period_ms)?,
        };

        let engine = self.engine.clone();
        let outbox = self.outbox.clone();
        let on_event = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            dispatch(&engine, &outbox, Trigger::Event(event.type_()))
        });

        let mut watch = WebWatch {
            source: Some(source),
            on_event,
            on_deadline: self.trigger_callback(Trigger::Deadline),
            events: Vec::with_capacity(events.len()),
        };

        for &name in events {
            let added = self
                .window
                .add_event_listener_with_callback(name, watch.on_event.as_ref().unchecked_ref());
            if let Err(err) = added {
                watch.disconnect(&self.window);
                return Err(host_error(&format!("addEventListener({})", name), err));
            }
            watch.events.push(name);
        }

        Ok(watch)
    }

    fn detach(&mut self, mut watch: WebWatch) {
        watch.disconnect(&self.window);

        // A listener may be mid-dispatch; release the closures on a later turn.
        let release = Closure::once_into_js(move || drop(watch));
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(release.unchecked_ref(), 0)
        {
            warn!(?err, "could not defer listener release");
        }
    }

    fn schedule(&mut self, watch: &WebWatch, delay_ms: u32) -> Result<i32, SizeError> {
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                watch.on_deadline.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .map_err(|err| host_error("setTimeout", err))
    }

    fn cancel(&mut self, timer: i32) {
        self.window.clear_timeout_with_handle(timer);
    }
}
