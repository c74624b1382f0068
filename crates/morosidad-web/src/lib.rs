#![forbid(unsafe_code)]

//! Browser frontend for the morosidad risk page.
//!
//! The decisions live in [`morosidad_core`]; this crate reads the DOM,
//! performs requests and applies the resulting effects. Exports:
//!
//! - `mountPredictionForm(configJson?)` binds the form page.
//! - `mountStatisticsPanel(configJson?)` returns a `StatsHandle` with
//!   `stop()` and `refresh(button?)`.
//! - `nuevaPrediccion()`, `imprimirResultado()`, `stageDemoProfile(index)`
//!   and `formatearMoneda(value)` for inline page handlers.

pub mod dom_ids;
pub mod logging;
pub mod markup;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod form_page;
#[cfg(target_arch = "wasm32")]
mod http;
#[cfg(target_arch = "wasm32")]
mod stats_page;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use stats_page::StatsHandle;
#[cfg(target_arch = "wasm32")]
pub use wasm::{
    formatear_moneda, imprimir_resultado, mount_prediction_form, mount_statistics_panel,
    nueva_prediccion, stage_demo_profile,
};
