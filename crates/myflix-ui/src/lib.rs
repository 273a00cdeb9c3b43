#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions, clippy::redundant_pub_crate)]
//! myFlix web UI.
//!
//! Layout:
//! - `core/`: store and UI primitives shared by every page
//! - `features/`: welcome, movies and profile pages; state and actions stay DOM-free
//! - `app/` and `components/` (wasm32 only): router, service context and shared widgets

pub mod core;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
