use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use sitefx_chrome::ChromeConfig;

pub mod chrome;
pub mod dom;
pub mod reveal;

use crate::chrome::ChromeRuntime;
use crate::reveal::RevealRuntime;

/// Everything a host can tune. Both halves are optional and partial.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteFxConfig {
    pub reveal: sitefx_reveal::Config,
    pub chrome: ChromeConfig,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second initialize() on the same page keeps the first subscriber.
    let _ = tracing_wasm::try_set_as_global_default();
}

/// Live page effects. Dropping the handle disconnects observers and
/// detaches listeners.
#[wasm_bindgen]
pub struct SiteFx {
    reveal: Rc<RevealRuntime>,
    _chrome: ChromeRuntime,
}

/// Wire the reveal pipeline and page chrome to the current document.
/// Pass a config object or undefined/null for the stock behaviour.
/// Example:
///   initialize({ reveal: { timeline: { step_ms: 150 } } })
#[wasm_bindgen]
pub fn initialize(config: JsValue) -> Result<SiteFx, JsError> {
    init_logging();

    let cfg: SiteFxConfig = if jsvalue_is_undefined_or_null(&config) {
        SiteFxConfig::default()
    } else {
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
    };
    cfg.reveal
        .validate()
        .map_err(|e| JsError::new(&format!("reveal config error: {e}")))?;
    cfg.chrome
        .validate()
        .map_err(|e| JsError::new(&format!("chrome config error: {e}")))?;

    let window = web_sys::window().ok_or_else(|| JsError::new("initialize: no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("initialize: no document"))?;

    let reveal = RevealRuntime::start(document.clone(), cfg.reveal)
        .map_err(|e| JsError::new(&format!("observer setup error: {e:?}")))?;
    let chrome = ChromeRuntime::install(cfg.chrome, window, document);
    tracing::info!(revealed = reveal.revealed_count(), "sitefx initialized");

    Ok(SiteFx {
        reveal,
        _chrome: chrome,
    })
}

#[wasm_bindgen]
impl SiteFx {
    /// Elements that have gone through their one-time reveal.
    #[wasm_bindgen(js_name = revealed_count)]
    pub fn revealed_count(&self) -> usize {
        self.reveal.revealed_count()
    }

    #[wasm_bindgen(js_name = is_animating)]
    pub fn is_animating(&self) -> bool {
        self.reveal.is_animating()
    }
}

impl Drop for SiteFx {
    fn drop(&mut self) {
        self.reveal.disconnect();
    }
}

#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

#[cfg(feature = "autostart")]
thread_local! {
    static PAGE: std::cell::RefCell<Option<SiteFx>> = const { std::cell::RefCell::new(None) };
}

/// Start with defaults when the module loads and keep running for the
/// lifetime of the page.
#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let fx = initialize(JsValue::UNDEFINED)?;
    PAGE.with(|page| *page.borrow_mut() = Some(fx));
    Ok(())
}
