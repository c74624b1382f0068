#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the prediction and statistics pages.
//!
//! Only compiled on `wasm32` targets.

use js_sys::Reflect;
use morosidad_core::demo;
use morosidad_core::form::normalize_currency;
use morosidad_core::{ClientConfig, FormMsg, HandoffSlot};
use tracing::Level;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::form_page::FormPage;
use crate::logging::{self, ConsoleMakeWriter};
use crate::stats_page::StatsHandle;
use crate::storage::SessionStore;

fn console_call(method: &str, msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(func) = Reflect::get(&console, &method.into()) else {
        return;
    };
    let Ok(func) = func.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = func.call1(&console, &JsValue::from_str(msg));
}

fn console_log(msg: &str) {
    console_call("log", msg);
}

fn console_error(msg: &str) {
    console_call("error", msg);
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parse an optional JSON config; absent or blank means defaults.
fn load_config(config_json: Option<String>) -> Result<ClientConfig, JsValue> {
    let Some(json) = config_json.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(ClientConfig::default());
    };
    ClientConfig::from_json_str(json).map_err(|err| {
        tracing::warn!(error = %err, "rejected client config");
        to_js(err)
    })
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
    logging::init(
        ConsoleMakeWriter::new(console_log, console_error),
        Level::INFO,
    );
}

/// Bind the prediction form and load a pending pre-filled profile.
#[wasm_bindgen(js_name = mountPredictionForm)]
pub fn mount_prediction_form(config_json: Option<String>) -> Result<(), JsValue> {
    let config = load_config(config_json)?;
    FormPage::mount(config)?;
    Ok(())
}

/// Start the statistics panel: fetch now and on every refresh interval.
#[wasm_bindgen(js_name = mountStatisticsPanel)]
pub fn mount_statistics_panel(config_json: Option<String>) -> Result<StatsHandle, JsValue> {
    let config = load_config(config_json)?;
    StatsHandle::mount(config)
}

/// Hide the result, clear the form and scroll back to the top.
#[wasm_bindgen(js_name = nuevaPrediccion)]
pub fn nueva_prediccion() {
    match FormPage::current() {
        Some(page) => page.dispatch(FormMsg::Reset),
        None => tracing::warn!("nuevaPrediccion called before mountPredictionForm"),
    }
}

#[wasm_bindgen(js_name = imprimirResultado)]
pub fn imprimir_resultado() {
    match FormPage::current() {
        Some(page) => page.dispatch(FormMsg::Print),
        None => {
            if let Ok(window) = dom::window() {
                let _ = window.print();
            }
        }
    }
}

/// Store demo profile `index` for the form page and navigate there.
/// Returns the profile name.
#[wasm_bindgen(js_name = stageDemoProfile)]
pub fn stage_demo_profile(index: usize, config_json: Option<String>) -> Result<String, JsValue> {
    let config = load_config(config_json)?;
    let mut store = SessionStore::open().map_err(to_js)?;
    let slot = HandoffSlot::new(config.handoff_key);
    let name = demo::stage_demo_profile(index, &slot, &mut store).map_err(to_js)?;
    dom::window()?.location().set_href("/")?;
    Ok(name.to_owned())
}

/// Normalize a currency amount to two decimals. Input with no digits is
/// returned unchanged.
#[wasm_bindgen(js_name = formatearMoneda)]
pub fn formatear_moneda(value: &str) -> String {
    normalize_currency(value).unwrap_or_else(|| value.to_owned())
}
