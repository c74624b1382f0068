#![forbid(unsafe_code)]

//! `morosidad-core` holds everything the morosidad risk page does that does
//! not need a browser.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding page reads DOM values, performs
//!   requests and applies effects; this crate only decides.
//! - **Deterministic time**: refresh timers and deferred effects advance on
//!   an explicit clock so tests step them without sleeping.
//! - **Typed view models**: rendering is a pure function from server data to
//!   the values the page displays.
//!
//! The `morosidad-web` crate wraps these pieces with `wasm-bindgen`.

pub mod assist;
pub mod config;
pub mod controller;
pub mod decimal;
pub mod demo;
pub mod error;
pub mod field;
pub mod form;
pub mod handoff;
pub mod prediction;
pub mod schedule;
pub mod stats;

pub use config::{ClientConfig, ConfigError};
pub use controller::form::{DisplayMode, FormEffect, FormMsg, PredictionForm};
pub use controller::stats::{FetchOrigin, StatsEffect, StatsMsg, StatsPanel};
pub use error::{ClientError, PayloadError};
pub use field::FieldId;
pub use form::{ApplicantProfile, FieldMark, FormSnapshot, ValidationReport};
pub use handoff::{HandoffError, HandoffSlot, MemoryStore, PrefilledProfile, TransientStore};
pub use prediction::{PredictionResult, ResultView};
pub use schedule::{DeterministicClock, RefreshTask};
pub use stats::{BarChart, StatsSnapshot, StatsView};
