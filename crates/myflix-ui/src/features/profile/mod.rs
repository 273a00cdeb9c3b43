//! Profile feature wiring.
//!
//! # Design
//! - Load the account and the catalog, then show the favourites in catalog order.
//! - Keep edit form inputs as strings and convert on save.
//! - Deleting the account always ends on the welcome page.

pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
