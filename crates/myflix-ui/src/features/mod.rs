//! Feature slices: one folder per page, with DOM-free state and logic next
//! to the wasm-only views.
pub mod auth;
pub mod movies;
pub mod profile;
