#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]
//! HTTP access layer for the myFlix movie API.
//!
//! Layout:
//! - `api`: one method per REST endpoint, token passed explicitly
//! - `session`: the `Anonymous | Authenticated` session and its key/value persistence
//! - `service`: the session-aware [`Myflix`] facade used by the CLI and web UI
//! - `profile`: favourites-to-catalog join backing the profile page
//! - `config` / `error`: client settings and the structured error type
//! - `notice`: fixed sentences shown to users after each action

pub mod api;
pub mod config;
pub mod error;
pub mod notice;
pub mod profile;
pub mod service;
pub mod session;

pub use api::ApiClient;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{ApiError, ErrorKind, StoreError};
pub use myflix_api_models as models;
pub use profile::{ProfileView, select_favourites};
pub use service::{FavouriteChange, Myflix};
#[cfg(not(target_arch = "wasm32"))]
pub use session::FileBackend;
pub use session::{AuthenticatedSession, MemoryBackend, Session, SessionBackend, SessionStore};
