#![forbid(unsafe_code)]

//! Elm-style page controllers.
//!
//! Each controller owns its state, takes messages produced by the page
//! adapter and returns effects for the adapter to apply. Effects that must
//! happen later are wrapped in an `After` variant carrying the delay, so the
//! whole timeline of a user action is visible in the returned list.

pub mod form;
pub mod stats;
