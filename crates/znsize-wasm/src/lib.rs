//! WebAssembly bindings for the ZnSize page sizing engine.
//!
//! This crate exposes the engine to JavaScript running inside the page (or
//! iframe) to be measured. The host supplies a callback; ZnSize calls it with
//! `{ width, height }` whenever the rendered size changes.
//!
//! ## Example
//!
//! ```js
//! import { ZnSize } from 'znsize';
//!
//! const sizer = new ZnSize(({ width, height }) => {
//!   parent.postMessage({ type: 'resize', width, height }, '*');
//! }, { height: 'content', width: 'scroll' });
//!
//! // Report now and whenever the DOM, an animation or a transition changes the size
//! sizer.autoSize();
//!
//! // Later
//! sizer.stopAutoSize();
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use znsize_core::Dimensions;
use znsize_engine::{SizeEngine, Trigger, UpdateRequester, WatchMode};

mod host;
mod page;
mod types;

pub use types::*;

use host::WebHost;
use page::WebPage;

pub(crate) type WebEngine = SizeEngine<WebPage, WebHost, Outbox>;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Route `tracing` output to the browser console. Returns `false` if a
/// subscriber was already installed.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() -> bool {
    tracing_wasm::try_set_as_global_default().is_ok()
}

/// Notifications waiting to be handed to the JS callback.
///
/// The engine only queues; the queue is flushed once the engine borrow is
/// released, so the callback is free to call back into [`ZnSize`].
#[derive(Clone)]
pub(crate) struct Outbox {
    queue: Rc<RefCell<VecDeque<Dimensions>>>,
    callback: js_sys::Function,
}

impl Outbox {
    fn new(callback: js_sys::Function) -> Self {
        Self {
            queue: Rc::default(),
            callback,
        }
    }

    fn flush(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(dimensions) = next else {
                break;
            };
            let value = match serde_wasm_bindgen::to_value(&dimensions) {
                Ok(value) => value,
                Err(err) => {
                    error!(%err, "could not convert dimensions");
                    continue;
                }
            };
            if let Err(err) = self.callback.call1(&JsValue::NULL, &value) {
                error!(?err, "update requester threw");
            }
        }
    }
}

impl UpdateRequester for Outbox {
    fn request_update(&mut self, dimensions: Dimensions) {
        self.queue.borrow_mut().push_back(dimensions);
    }
}

/// Feed a browser-side trigger into the engine, then deliver notifications.
pub(crate) fn dispatch(engine: &Weak<RefCell<WebEngine>>, outbox: &Outbox, trigger: Trigger) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    match engine.try_borrow_mut() {
        Ok(mut engine) => {
            engine.handle(trigger);
        }
        Err(_) => {
            warn!(?trigger, "engine busy, trigger dropped");
            return;
        }
    }
    outbox.flush();
}

/// The sizing engine interface for JavaScript.
#[wasm_bindgen]
pub struct ZnSize {
    engine: Rc<RefCell<WebEngine>>,
    outbox: Outbox,
}

#[wasm_bindgen]
impl ZnSize {
    /// Create an idle engine reporting to `update_requester`.
    ///
    /// `options` is `{ height?: string, width?: string }`; both default to
    /// `"content"`. Unknown strategy names are rejected here.
    #[wasm_bindgen(constructor)]
    pub fn new(update_requester: js_sys::Function, options: JsValue) -> Result<ZnSize, JsError> {
        let options = SizeOptionsJs::from_js(options)?
            .into_core()
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
        let window = web_sys::window().ok_or_else(|| JsError::new("No window available"))?;
        let page = WebPage::new(&window).map_err(|e| JsError::new(&e.to_string()))?;

        let outbox = Outbox::new(update_requester);
        let engine = Rc::new_cyclic(|weak| {
            let host = WebHost::new(window, weak.clone(), outbox.clone());
            RefCell::new(SizeEngine::new(page, host, outbox.clone(), options))
        });

        Ok(ZnSize { engine, outbox })
    }

    /// Get the version of the engine.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Re-measure and notify if either dimension moved by 2px or more.
    #[wasm_bindgen(js_name = measureAndUpdate)]
    pub fn measure_and_update(&self) -> Result<bool, JsError> {
        self.with_engine(|engine| engine.measure_and_update())
    }

    /// Re-measure and always notify, using `dimensions.width` /
    /// `dimensions.height` in place of the measured values when given.
    #[wasm_bindgen(js_name = sendDimensions)]
    pub fn send_dimensions(&self, dimensions: JsValue) -> Result<JsValue, JsError> {
        let overrides = DimensionOverridesJs::from_js(dimensions)?.into_core();
        let sent = self.with_engine(|engine| engine.send_dimensions(overrides))?;
        serde_wasm_bindgen::to_value(&sent)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Start auto-sizing. Watches DOM mutations, or polls every `interval`
    /// milliseconds when given. Returns `false` if already active.
    #[wasm_bindgen(js_name = autoSize)]
    pub fn auto_size(&self, interval: Option<u32>) -> Result<bool, JsError> {
        let mode = match interval {
            Some(period_ms) => WatchMode::Interval { period_ms },
            None => WatchMode::Mutations,
        };
        self.with_engine(|engine| engine.auto_size(mode))?
            .map_err(|e| JsError::new(&format!("Auto-size error: {}", e)))
    }

    /// Stop auto-sizing. Returns `false` if it was not active.
    #[wasm_bindgen(js_name = stopAutoSize)]
    pub fn stop_auto_size(&self) -> Result<bool, JsError> {
        self.with_engine(|engine| engine.stop_auto_size())
    }

    /// Measure the page width with the named strategy, or the configured one.
    #[wasm_bindgen(js_name = getWidth)]
    pub fn get_width(&self, method: Option<String>) -> Result<f64, JsError> {
        self.with_engine(|engine| engine.get_width_named(method.as_deref()))?
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Measure the page height with the named strategy, or the configured one.
    #[wasm_bindgen(js_name = getHeight)]
    pub fn get_height(&self, method: Option<String>) -> Result<f64, JsError> {
        self.with_engine(|engine| engine.get_height_named(method.as_deref()))?
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Check if auto-sizing is active.
    #[wasm_bindgen(js_name = isAutoEnabled)]
    pub fn is_auto_enabled(&self) -> bool {
        self.engine
            .try_borrow()
            .map(|engine| engine.is_auto_enabled())
            .unwrap_or(false)
    }

    /// Last measured width in pixels.
    #[wasm_bindgen(getter, js_name = currentWidth)]
    pub fn current_width(&self) -> f64 {
        self.engine
            .try_borrow()
            .map(|engine| engine.current_width())
            .unwrap_or(0.0)
    }

    /// Last measured height in pixels.
    #[wasm_bindgen(getter, js_name = currentHeight)]
    pub fn current_height(&self) -> f64 {
        self.engine
            .try_borrow()
            .map(|engine| engine.current_height())
            .unwrap_or(0.0)
    }
}

impl ZnSize {
    fn with_engine<T>(&self, f: impl FnOnce(&mut WebEngine) -> T) -> Result<T, JsError> {
        let result = {
            let mut engine = self
                .engine
                .try_borrow_mut()
                .map_err(|_| JsError::new("ZnSize is busy measuring"))?;
            f(&mut engine)
        };
        self.outbox.flush();
        Ok(result)
    }
}

/// Get the engine version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
