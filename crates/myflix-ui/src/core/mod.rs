//! Core, DOM-free primitives and helpers for the Web UI.
pub mod store;
pub mod ui;
