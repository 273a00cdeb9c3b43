//! Welcome page login and registration dialogs.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
