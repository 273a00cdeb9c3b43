//! Persistence and environment helpers for the app shell.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use myflix_client::error::StoreError;
use myflix_client::{DEFAULT_API_URL, SessionBackend};
use wasm_bindgen::JsValue;

/// Session backend over `window.localStorage`, storing raw strings under the
/// `user`, `token` and `Username` keys.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalStorageBackend;

impl SessionBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| storage_error("get", key, &err))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| storage_error("set", key, &err))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| storage_error("delete", key, &err))
    }
}

/// API base URL: the build-time `MYFLIX_API_URL` override, else the hosted API.
pub(crate) fn api_base_url() -> &'static str {
    option_env!("MYFLIX_API_URL")
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_API_URL)
}

fn storage_error(operation: &'static str, key: &str, err: &JsValue) -> StoreError {
    let detail = err
        .as_string()
        .unwrap_or_else(|| format!("{err:?}"));
    log_storage_error(operation, key, &detail);
    StoreError::Backend { detail }
}

fn log_storage_error(operation: &'static str, key: &str, detail: &str) {
    console::error!("storage operation failed", operation, key.to_string(), detail.to_string());
}
