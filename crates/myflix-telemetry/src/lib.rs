#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links)]
#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
//! Telemetry primitives shared by the myFlix binaries.
//!
//! Only logging lives here today: one entry point that installs a
//! `tracing-subscriber` stack in pretty or JSON form.

mod init;

pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
