//! Movie catalog feature wiring.
//!
//! # Design
//! - Keep catalog listing, detail dialogs and favourite toggling in one slice.
//! - Detail dialogs render data already embedded in each movie; no extra fetch.

pub mod actions;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
