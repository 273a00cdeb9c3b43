//! API service context for sharing a singleton `Myflix` instance.
//!
//! # Design
//! - Create exactly one service per app boot.
//! - Session changes happen inside the service; views mirror them into the store.

use std::rc::Rc;

use myflix_client::{ApiClient, ApiError, ClientConfig, Myflix, Session};

use crate::app::preferences::LocalStorageBackend;

/// Browser flavour of the service.
pub(crate) type Service = Myflix<LocalStorageBackend>;

/// Shared service context for UI features.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton service instance.
    pub(crate) service: Rc<Service>,
}

impl ApiCtx {
    /// Build the service for `base_url`, restoring any stored session.
    pub(crate) fn new(base_url: &str) -> Result<Self, ApiError> {
        let config = ClientConfig::new(base_url)?;
        let api = ApiClient::new(&config)?;
        let service = Myflix::new(api, LocalStorageBackend)?;
        Ok(Self {
            service: Rc::new(service),
        })
    }

    /// Snapshot of the current session for the store.
    pub(crate) fn session(&self) -> Session {
        self.service.session()
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.service, &other.service)
    }
}
